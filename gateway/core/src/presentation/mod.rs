// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`clarity-gateway-core`)
//!
//! HTTP surface that translates external requests into application service
//! calls. **No business logic lives here** — all real work is delegated to
//! the gateway service in `crate::application`.

pub mod api;
