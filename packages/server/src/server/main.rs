// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use ingestion::{AzureOpenAI, HttpPageFetcher};
use server_core::domains::products::MongoProductStore;
use server_core::domains::suppliers::PgSupplierStore;
use server_core::domains::vetting::PgVettingStore;
use server_core::kernel::{FormsOcrClient, HttpBlobFetcher, ServerDeps};
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
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

    tracing::info!("Starting GreenChainz supplier directory API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Connect to MongoDB (product catalog documents)
    tracing::info!("Connecting to MongoDB...");
    let mongo = mongodb::Client::with_uri_str(&config.mongodb_url)
        .await
        .context("Failed to connect to MongoDB")?;
    let products = MongoProductStore::new(&mongo, &config.mongodb_database)
        .await
        .context("Failed to initialize product store")?;

    // AI extraction client
    let mut extractor = AzureOpenAI::new(
        config.azure_openai_api_key.clone(),
        config.azure_openai_endpoint.clone(),
        config.azure_openai_deployment.clone(),
    );
    if let Some(version) = config.azure_openai_api_version.clone() {
        extractor = extractor.with_api_version(version);
    }

    let deps = Arc::new(ServerDeps::new(
        Arc::new(PgSupplierStore::new(pool.clone())),
        Arc::new(products),
        Arc::new(PgVettingStore::new(pool.clone())),
        Arc::new(HttpPageFetcher::new()),
        Arc::new(extractor),
        Arc::new(HttpBlobFetcher::new()),
        Arc::new(FormsOcrClient::new(
            config.ocr_endpoint.clone(),
            config.ocr_api_key.clone(),
        )),
    ));

    let app = build_app(pool, deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
