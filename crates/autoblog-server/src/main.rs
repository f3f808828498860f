//! autoblog store endpoint binary

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use autoblog_core::Config;

#[derive(Parser)]
#[command(name = "autoblog-server")]
#[command(about = "Store and serve the latest autoblog article")]
#[command(version)]
struct Args {
    /// Address to listen on (overrides bind_addr)
    #[arg(short, long)]
    bind: Option<String>,

    /// Data directory holding articles.db (overrides data_dir)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    config.ensure_data_dir()?;
    autoblog_server::prepare_store(&config)?;

    if config.access_key.is_none() {
        info!("no access_key configured; requests are not authenticated");
    }

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    autoblog_server::serve(config, listener, shutdown_signal()).await
}

/// Log to stderr, filtered by AUTOBLOG_LOG (default: info)
fn init_logging() {
    let level = std::env::var("AUTOBLOG_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_new(format!(
        "autoblog_server={},autoblog_core={}",
        level, level
    ))
    .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => error!("failed to install SIGTERM handler: {}", err),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
