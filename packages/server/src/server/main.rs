// Main entry point for the summarizer API server

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::domains::summarization::{JobProcessor, PostgresSummaryCache};
use server_core::kernel::jobs::{InProcessQueue, JobWorker, PostgresJobStore, RetryingJobStore};
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use summarize::ai::OpenAi;
use summarize::fetcher::HttpFetcher;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Async Summarizer API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Wire the processing pipeline
    let job_store = Arc::new(RetryingJobStore::new(PostgresJobStore::new(pool.clone())));
    let cache = Arc::new(PostgresSummaryCache::new(pool.clone()));
    let fetcher = Arc::new(HttpFetcher::new());
    let summarizer = Arc::new(
        OpenAi::new(config.llm_token.clone())
            .with_base_url(config.llm_endpoint.clone())
            .with_model(config.llm_model.clone()),
    );
    let processor = Arc::new(JobProcessor::new(
        job_store.clone(),
        cache,
        fetcher,
        summarizer,
    ));

    // Start the worker
    let (queue, queue_rx) = InProcessQueue::new();
    let shutdown = CancellationToken::new();
    let worker = JobWorker::new(queue_rx, processor);
    let worker_handle = tokio::spawn(worker.run(shutdown.clone()));

    // Cancel everything on ctrl-c
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            signal_shutdown.cancel();
        }
    });

    // Start the HTTP server
    let app = build_app(job_store, Arc::new(queue));
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .await
        .context("Server error")?;

    // Let in-flight jobs drain before exiting
    shutdown.cancel();
    let _ = worker_handle.await;

    Ok(())
}
