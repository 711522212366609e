// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::start_server;
use crate::config::AppConfig;
use crate::services::Services;
use crate::version;

/// Freshness-seeking retrieval augmented assistant
#[derive(Parser, Debug)]
#[command(name = "fresh-rag")]
#[command(version)]
#[command(about = "Answer questions grounded in live web search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Answer one question and exit
    Ask {
        /// Question text
        text: String,

        /// User identifier for conversation memory
        #[arg(long)]
        user: Option<String>,

        /// Append fact-check verdicts to the answer
        #[arg(long)]
        annotate: bool,
    },

    /// Print the retrieval context for a query
    Context {
        /// Query text
        query: String,
    },
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env()?;
    let services = Services::from_config(&config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting {}", version::get_version_string());
            start_server(&config.server.bind_addr(), services.app_state()).await
        }
        Commands::Ask {
            text,
            user,
            annotate,
        } => {
            let outcome = services.assistant.ask(&text, user.as_deref()).await;
            if annotate {
                println!("{}", outcome.verification.annotate(&outcome.answer));
            } else {
                println!("{}", outcome.answer);
            }
            Ok(())
        }
        Commands::Context { query } => {
            let (context, report) = services.builder.build_with_report(&query).await;
            println!("{}", context);
            for (url, reason) in &report.failed {
                eprintln!("skipped {}: {}", url, reason);
            }
            Ok(())
        }
    }
}
