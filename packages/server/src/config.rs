use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub mongodb_url: String,
    pub mongodb_database: String,
    pub port: u16,
    pub azure_openai_api_key: String,
    pub azure_openai_endpoint: String,
    pub azure_openai_deployment: String,
    pub azure_openai_api_version: Option<String>,
    pub ocr_endpoint: String,
    pub ocr_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            mongodb_url: env::var("MONGODB_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "greenchainz_catalog".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            azure_openai_api_key: env::var("AZURE_OPENAI_API_KEY")
                .context("AZURE_OPENAI_API_KEY must be set")?,
            azure_openai_endpoint: env::var("AZURE_OPENAI_ENDPOINT")
                .context("AZURE_OPENAI_ENDPOINT must be set")?,
            azure_openai_deployment: env::var("AZURE_OPENAI_DEPLOYMENT_NAME")
                .context("AZURE_OPENAI_DEPLOYMENT_NAME must be set")?,
            azure_openai_api_version: env::var("AZURE_OPENAI_API_VERSION").ok(),
            ocr_endpoint: env::var("OCR_ENDPOINT")
                .context("OCR_ENDPOINT must be set")?,
            ocr_api_key: env::var("OCR_API_KEY").ok(),
        })
    }
}
