// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::application::gateway::{GatewayError, GatewayService};
use crate::domain::analyzer::AnalyzerError;
use crate::domain::record::AnalysisRequest;

pub struct AppState {
    pub gateway: Arc<dyn GatewayService>,
    pub started_at: Instant,
}

pub fn app(gateway: Arc<dyn GatewayService>) -> Router {
    let state = Arc::new(AppState {
        gateway,
        started_at: Instant::now(),
    });

    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Deserialize)]
pub struct AnalyzeRequest {
    /// Absent and empty are treated alike so both fail with the same 400.
    #[serde(rename = "policyText", default)]
    pub policy_text: Option<String>,
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Response {
    let request = AnalysisRequest {
        policy_text: payload.policy_text.unwrap_or_default(),
    };

    match state.gateway.analyze(request).await {
        Ok(outcome) => Json(json!({
            // Legacy field name retained for existing clients.
            "firebase_id": outcome.id.to_string(),
            "result": outcome.result,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// Maps the gateway error taxonomy to distinct status codes: caller fault is
/// 400, upstream analyzer faults are 502/504, a store fault is 500.
fn error_response(err: GatewayError) -> Response {
    let status = match &err {
        GatewayError::InvalidInput => StatusCode::BAD_REQUEST,
        GatewayError::AnalyzerExecution(AnalyzerError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        GatewayError::AnalyzerExecution(_) => StatusCode::BAD_GATEWAY,
        GatewayError::AnalyzerOutput { .. } => StatusCode::BAD_GATEWAY,
        GatewayError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    // Raw analyzer output is echoed back only for parse failures, to aid
    // debugging.
    let body = match &err {
        GatewayError::AnalyzerOutput { raw, .. } => json!({
            "error": err.to_string(),
            "raw": raw,
        }),
        _ => json!({ "error": err.to_string() }),
    };

    (status, Json(body)).into_response()
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}
