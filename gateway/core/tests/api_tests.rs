// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use clarity_gateway_core::application::gateway::{
    AnalysisOutcome, GatewayError, GatewayService,
};
use clarity_gateway_core::domain::analyzer::AnalyzerError;
use clarity_gateway_core::domain::record::{AnalysisRequest, AnalysisResult, RecordId};
use clarity_gateway_core::domain::repository::StoreError;
use clarity_gateway_core::presentation::api;

/// Scripted gateway: validates input like the real service, then replays a
/// fixed behavior.
enum Scripted {
    Ok { id: Uuid, result: Value },
    ExecutionFailure,
    Timeout,
    BadOutput { raw: String },
    StoreFailure,
}

struct ScriptedGateway(Scripted);

#[async_trait]
impl GatewayService for ScriptedGateway {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, GatewayError> {
        if request.policy_text.trim().is_empty() {
            return Err(GatewayError::InvalidInput);
        }
        match &self.0 {
            Scripted::Ok { id, result } => Ok(AnalysisOutcome {
                id: RecordId(*id),
                result: AnalysisResult(result.clone()),
            }),
            Scripted::ExecutionFailure => Err(GatewayError::AnalyzerExecution(
                AnalyzerError::NonZeroExit {
                    code: 1,
                    stderr: "ModuleNotFoundError: orchestrator".to_string(),
                },
            )),
            Scripted::Timeout => {
                Err(GatewayError::AnalyzerExecution(AnalyzerError::Timeout(30)))
            }
            Scripted::BadOutput { raw } => Err(GatewayError::AnalyzerOutput {
                message: "expected value at line 1 column 1".to_string(),
                raw: raw.clone(),
            }),
            Scripted::StoreFailure => Err(GatewayError::Persistence(StoreError::Database(
                "connection refused".to_string(),
            ))),
        }
    }
}

fn app(behavior: Scripted) -> axum::Router {
    api::app(Arc::new(ScriptedGateway(behavior)))
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn analyze_success_returns_id_and_result() {
    let id = Uuid::new_v4();
    let result = json!({ "summary": { "critical": 0, "warnings": [] } });
    let app = app(Scripted::Ok {
        id,
        result: result.clone(),
    });

    let response = app
        .oneshot(analyze_request(json!({ "policyText": "some policy" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["firebase_id"], json!(id.to_string()));
    assert_eq!(body["result"], result);
}

#[tokio::test]
async fn empty_policy_text_is_400() {
    let app = app(Scripted::Ok {
        id: Uuid::new_v4(),
        result: json!({}),
    });

    let response = app
        .oneshot(analyze_request(json!({ "policyText": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert!(body.get("raw").is_none());
}

#[tokio::test]
async fn missing_policy_text_is_400() {
    let app = app(Scripted::Ok {
        id: Uuid::new_v4(),
        result: json!({}),
    });

    let response = app.oneshot(analyze_request(json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyzer_crash_is_502() {
    let app = app(Scripted::ExecutionFailure);

    let response = app
        .oneshot(analyze_request(json!({ "policyText": "some policy" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("ModuleNotFoundError"));
}

#[tokio::test]
async fn analyzer_timeout_is_504() {
    let app = app(Scripted::Timeout);

    let response = app
        .oneshot(analyze_request(json!({ "policyText": "some policy" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn unparseable_output_is_502_with_raw_echo() {
    let app = app(Scripted::BadOutput {
        raw: "not json".to_string(),
    });

    let response = app
        .oneshot(analyze_request(json!({ "policyText": "some policy" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["raw"], json!("not json"));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn store_failure_is_500_without_id() {
    let app = app(Scripted::StoreFailure);

    let response = app
        .oneshot(analyze_request(json!({ "policyText": "some policy" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body.get("firebase_id").is_none());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn health_reports_uptime() {
    let app = app(Scripted::Ok {
        id: Uuid::new_v4(),
        result: json!({}),
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert!(body["uptime_seconds"].is_u64());
}
