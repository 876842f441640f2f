// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Clarity Gateway CLI
//!
//! The `clarity-gateway` binary hosts the policy clarity gateway: an HTTP
//! endpoint that forwards policy text to the external clarity analyzer,
//! validates its JSON output and persists the result.
//!
//! ## Commands
//!
//! - `clarity-gateway serve` - Run the HTTP gateway
//! - `clarity-gateway config show|validate|generate` - Configuration management
//! - `clarity-gateway status` - Health-check a running gateway
//!
//! The host process wires the analyzer and store collaborators explicitly at
//! startup; nothing holds ambient global handles.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;

use commands::ConfigCommand;

/// Clarity Gateway - policy clarity analysis over HTTP
#[derive(Parser)]
#[command(name = "clarity-gateway")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "CLARITY_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP API port (overrides configuration)
    #[arg(long, global = true, env = "CLARITY_PORT")]
    port: Option<u16>,

    /// HTTP API host (overrides configuration)
    #[arg(long, global = true, env = "CLARITY_HOST")]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CLARITY_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway
    #[command(name = "serve")]
    Serve,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Health-check a running gateway
    #[command(name = "status")]
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Serve) => commands::serve::run(cli.config, cli.host, cli.port).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        Some(Commands::Status) => commands::status::run(cli.config, cli.host, cli.port).await,
        None => {
            // No command provided - show help
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
