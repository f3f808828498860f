//! autoblog store endpoint
//!
//! A small axum service with one resource, `/articles`:
//!
//! - `POST` stores an article (`201 {"success", "message", "id"}`)
//! - `GET` returns the latest article, or `null`
//! - `OPTIONS` answers CORS preflight
//!
//! The binary in `main.rs` wires this to configuration and a listener;
//! the library half lets tests and the client drive the same router.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use autoblog_core::{ArticleStore, Config};

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

/// Make sure the database exists and report what it holds
pub fn prepare_store(config: &Config) -> Result<u64> {
    let store = ArticleStore::open(config).context("Failed to open article store")?;
    let count = store.count().context("Failed to count articles")?;
    info!(path = ?config.sqlite_path(), articles = count, "article store ready");
    Ok(count)
}

/// Serve the endpoint on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(config: Config, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Listener has no local address")?;
    let app = build_router(AppState::new(config));

    info!(%addr, "store endpoint listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    Ok(())
}
