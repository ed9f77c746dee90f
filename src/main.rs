use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exercise_query_service::api::{router, AppState};
use exercise_query_service::config::ServiceConfig;
use exercise_query_service::ingestion::{IngestionOptions, TracingObserver};
use exercise_query_service::table::ExerciseTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exercise_query_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::parse();
    tracing::info!(?config, "starting exercise query service");

    let options = IngestionOptions {
        format: config.format,
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    let table = ExerciseTable::load(&config.data_path, &options)
        .with_context(|| format!("failed to load dataset from {}", config.data_path.display()))?;

    let addr = config.bind_addr().context("invalid bind address")?;
    let app = router(AppState::new(table));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
