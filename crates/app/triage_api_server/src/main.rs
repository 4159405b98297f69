//! Support triage relay server binary.
//!
//! Serves the forwarding endpoint and the analysis routes until Ctrl-C.

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use triage_api::config::{ApiConfig, DEFAULT_BIND_ADDR};

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "triage_api_server", about = "Support triage relay server")]
struct Args {
    /// Address to bind (port 0 = ephemeral).
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind: String,

    /// n8n webhook to forward chat messages to. Defaults to the hosted
    /// workflow.
    #[arg(long, env = "N8N_WEBHOOK_URL")]
    webhook_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,triage_api=debug,triage_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    config.bind_addr = args.bind;
    if let Some(url) = args.webhook_url {
        config.webhook_url = url;
    }
    config.validate()?;

    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY not set; analysis routes will fail");
    }

    info!(webhook_url = %config.webhook_url, "starting triage_api_server");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = triage_api::router(triage_api::AppState::new(config));

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received, shutting down");
            }
            shutdown.cancel();
        }
    });

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
