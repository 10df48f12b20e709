//! BST Web Gateway

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bst_web::{routes, AppState, Config, InMemorySessionStore, SessionStore, UpstreamClient};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bst_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    let upstream = UpstreamClient::new(config.api_url.clone(), config.api_timeout())?;
    let sessions = Arc::new(InMemorySessionStore::new(config.session_ttl()));

    // Sweep sessions nobody reads again
    let sweeper = sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            match sweeper.cleanup_expired() {
                Ok(0) => {}
                Ok(removed) => tracing::debug!(removed, "Swept expired sessions"),
                Err(e) => tracing::warn!(error = %e, "Session sweep failed"),
            }
        }
    });

    // Create app state
    let state = Arc::new(AppState::new_with_arcs(
        config.clone(),
        sessions,
        Arc::new(upstream),
    ));

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!(
        api = %config.api_url,
        "Serving https://{} (TLS terminated upstream of this process)",
        config.host
    );

    axum::serve(listener, app).await?;

    Ok(())
}
