// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod record;
pub mod analyzer;
pub mod repository;
pub mod gateway_config;
