//! WoundIQ API server binary.
//!
//! Bootstraps the process: optional `.env`, tracing, configuration, the
//! PostgreSQL pool, then serves the REST router until SIGINT/SIGTERM, at
//! which point in-flight requests are allowed to finish before exit.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use woundiq_core::{db, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("woundiq=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env().context("failed to load config")?;
    let addr = cfg.bind_addr();

    let pool = db::connect(&cfg.database_url)
        .await
        .context("db open failed")?;

    let app = api_rest::router(api_rest::AppState::new(pool));

    tracing::info!("++ Starting WoundIQ REST on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server exiting");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM; axum then stops accepting connections and
/// drains in-flight requests.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down server...");
}
