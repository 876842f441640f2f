// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Clarity Gateway Core
//!
//! Domain model, gateway service, collaborator implementations and the
//! HTTP surface for the policy clarity gateway.
//!
//! # Architecture
//!
//! - **domain** — entities, collaborator traits, errors, configuration
//! - **application** — the `analyze` gateway service
//! - **infrastructure** — subprocess analyzer, record stores
//! - **presentation** — axum HTTP API

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
