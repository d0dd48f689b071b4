mod cli;
mod routes;

use crate::cli::Args;
use crate::routes::{app, AppState};
use anyhow::Context;
use clap::Parser;
use rulecheck_runtime::{OpenAiClient, RuleChecker};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    // Missing credentials abort here, before the listener opens.
    let client = OpenAiClient::from_env().context("completion client not configured")?;
    let checker = Arc::new(RuleChecker::new(Arc::new(client)));
    let state = AppState { checker };

    let listener = TcpListener::bind(&args.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", args.listen_addr))?;
    info!(addr = %args.listen_addr, "rulecheck api listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
