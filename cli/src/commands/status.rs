// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Status command
//!
//! Probes a running gateway's /health endpoint.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use clarity_gateway_core::domain::gateway_config::GatewayConfig;

pub async fn run(
    config_path: Option<PathBuf>,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let config =
        GatewayConfig::load_or_default(config_path).context("Failed to load configuration")?;

    let host = host_override.unwrap_or(config.spec.network.bind_address);
    let port = port_override.unwrap_or(config.spec.network.api_port);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(1500))
        .build()?;

    let base_url = if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}:{}", host, port)
    } else {
        format!("http://{}:{}", host, port)
    };
    let health_url = format!("{}/health", base_url);

    match client.get(&health_url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let uptime = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v["uptime_seconds"].as_u64());

            match uptime {
                Some(secs) => println!("{} (up {}s)", "Gateway is running".green(), secs),
                None => println!("{}", "Gateway is running".green()),
            }
            Ok(())
        }
        Ok(resp) => {
            eprintln!("{} HTTP {}", "Gateway is unhealthy:".red(), resp.status());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} {}", "Gateway is not reachable:".red(), e);
            std::process::exit(1);
        }
    }
}
