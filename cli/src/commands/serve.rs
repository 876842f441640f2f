// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Serve command
//!
//! Loads configuration, wires the analyzer and store collaborators, and runs
//! the axum gateway until Ctrl+C / SIGTERM.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use clarity_gateway_core::application::StandardGatewayService;
use clarity_gateway_core::domain::analyzer::ClarityAnalyzer;
use clarity_gateway_core::domain::gateway_config::GatewayConfig;
use clarity_gateway_core::domain::repository::{RecordStore, StorageBackend};
use clarity_gateway_core::infrastructure::repositories::PostgresRecordStore;
use clarity_gateway_core::infrastructure::{InMemoryRecordStore, SubprocessAnalyzer};
use clarity_gateway_core::presentation::api;

pub async fn run(
    config_path: Option<PathBuf>,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let mut config =
        GatewayConfig::load_or_default(config_path).context("Failed to load configuration")?;

    if let Some(host) = host_override {
        config.spec.network.bind_address = host;
    }
    if let Some(port) = port_override {
        config.spec.network.api_port = port;
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    // Wire collaborators explicitly; lifecycle belongs to this process
    let analyzer: Arc<dyn ClarityAnalyzer> =
        Arc::new(SubprocessAnalyzer::new(config.spec.analyzer.clone()));

    let store: Arc<dyn RecordStore> = match &config.spec.storage {
        StorageBackend::Memory => {
            warn!("Using in-memory record store; analyses will not survive restarts");
            Arc::new(InMemoryRecordStore::new())
        }
        StorageBackend::Postgres(pg) => Arc::new(
            PostgresRecordStore::connect(pg)
                .await
                .context("Failed to connect to PostgreSQL")?,
        ),
    };

    let gateway = Arc::new(StandardGatewayService::new(
        analyzer,
        store,
        Duration::from_secs(config.spec.store_timeout_secs),
    ));

    let app = api::app(gateway);

    let addr = format!(
        "{}:{}",
        config.spec.network.bind_address, config.spec.network.api_port
    );
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Gateway shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
