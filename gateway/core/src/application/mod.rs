// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod gateway;

// Re-export the service for convenience
pub use gateway::{AnalysisOutcome, GatewayError, GatewayService, StandardGatewayService};
