//! # Folio Server
//!
//! A thin axum server over the `folio` core: the cross-collection search
//! endpoint, the recent-searches view, and the prompt-composition endpoint
//! consumed by the external chat client.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;

use state::AppState;
use tracing::info;

/// Serves the application on an already-bound listener. Split from `main`
/// so tests can spawn the server against a prepared state.
pub async fn run(listener: tokio::net::TcpListener, app_state: AppState) -> anyhow::Result<()> {
    let app = router::create_router(app_state);
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
