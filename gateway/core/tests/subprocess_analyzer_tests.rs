// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Exercises `SubprocessAnalyzer` against real child processes. The commands
//! used (`cat`, `sh`, `sleep`) are ubiquitous on Unix hosts.
#![cfg(unix)]

use std::sync::Arc;
use std::time::Duration;

use clarity_gateway_core::application::gateway::{GatewayError, GatewayService};
use clarity_gateway_core::application::StandardGatewayService;
use clarity_gateway_core::domain::analyzer::{AnalyzerError, ClarityAnalyzer};
use clarity_gateway_core::domain::gateway_config::AnalyzerConfig;
use clarity_gateway_core::domain::record::AnalysisRequest;
use clarity_gateway_core::domain::repository::RecordStore;
use clarity_gateway_core::infrastructure::{InMemoryRecordStore, SubprocessAnalyzer};

fn analyzer(program: &str, args: &[&str], timeout_secs: u64) -> SubprocessAnalyzer {
    SubprocessAnalyzer::new(AnalyzerConfig {
        program: program.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
        timeout_secs,
    })
}

#[tokio::test]
async fn text_reaches_the_child_verbatim() {
    // `cat` echoes stdin, so the output is exactly what the child received.
    let analyzer = analyzer("cat", &[], 10);
    let text = "Section 3.1: data may be shared with affiliates.";
    let output = analyzer.run_clarity(text).await.unwrap();
    assert_eq!(output, text);
}

#[tokio::test]
async fn shell_metacharacters_stay_inert() {
    let analyzer = analyzer("cat", &[], 10);
    let hostile = r#"It's a "test" && echo hacked; `rm -rf /` $(id) '''"#;
    let output = analyzer.run_clarity(hostile).await.unwrap();
    // Byte-for-byte: nothing was re-interpreted, expanded, or executed
    assert_eq!(output, hostile);
}

#[tokio::test]
async fn nonzero_exit_carries_code_and_stderr() {
    let analyzer = analyzer("sh", &["-c", "echo analyzer blew up >&2; exit 3"], 10);
    let err = analyzer.run_clarity("some policy").await.unwrap_err();
    match err {
        AnalyzerError::NonZeroExit { code, stderr } => {
            assert_eq!(code, 3);
            assert!(stderr.contains("analyzer blew up"));
        }
        other => panic!("expected NonZeroExit, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_program_is_a_spawn_failure() {
    let analyzer = analyzer("clarity-analyzer-that-does-not-exist", &[], 10);
    let err = analyzer.run_clarity("some policy").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::SpawnFailed(_)));
}

#[tokio::test]
async fn slow_analyzer_times_out() {
    let analyzer = analyzer("sleep", &["30"], 1);
    let err = analyzer.run_clarity("some policy").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::Timeout(1)));
}

#[tokio::test]
async fn child_that_ignores_stdin_still_completes() {
    // `echo` never reads stdin; the broken pipe on the writer side must not
    // fail the run.
    let analyzer = analyzer("echo", &["hello"], 10);
    let output = analyzer.run_clarity("some policy").await.unwrap();
    assert_eq!(output.trim(), "hello");
}

/// End-to-end through the real subprocess: `cat` echoes the policy text, so
/// feeding it a JSON document that satisfies the summary contract drives the
/// whole pipeline including persistence.
#[tokio::test]
async fn gateway_round_trip_through_real_subprocess() {
    let store = Arc::new(InMemoryRecordStore::new());
    let svc = StandardGatewayService::new(
        Arc::new(analyzer("cat", &[], 10)),
        store.clone(),
        Duration::from_secs(5),
    );

    let text = r#"{"summary":{"critical":1,"warnings":["ambiguous"]}}"#;
    let outcome = svc
        .analyze(AnalysisRequest {
            policy_text: text.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    let stored = store.find_by_id(outcome.id).await.unwrap().unwrap();
    assert_eq!(stored.policy_text, text);
    assert_eq!(stored.result, outcome.result);
}

/// Hostile text through the real pipeline: `cat` hands it back unchanged, it
/// fails JSON parsing, and the raw echo proves no shell ever touched it.
#[tokio::test]
async fn gateway_round_trip_preserves_hostile_text() {
    let store = Arc::new(InMemoryRecordStore::new());
    let svc = StandardGatewayService::new(
        Arc::new(analyzer("cat", &[], 10)),
        store.clone(),
        Duration::from_secs(5),
    );

    let hostile = r#"It's a "test" && echo hacked"#;
    let err = svc
        .analyze(AnalysisRequest {
            policy_text: hostile.to_string(),
        })
        .await
        .unwrap_err();

    match err {
        GatewayError::AnalyzerOutput { raw, .. } => assert_eq!(raw, hostile),
        other => panic!("expected AnalyzerOutput, got {:?}", other),
    }
    assert!(store.is_empty());
}
