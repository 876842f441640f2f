// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod analyzer;
pub mod repositories;

pub use analyzer::SubprocessAnalyzer;
pub use repositories::InMemoryRecordStore;
