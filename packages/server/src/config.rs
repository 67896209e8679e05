use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub llm_endpoint: String,
    pub llm_token: String,
    pub llm_model: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            llm_endpoint: env::var("LLM_ENDPOINT").context("LLM_ENDPOINT must be set")?,
            llm_token: env::var("LLM_TOKEN").context("LLM_TOKEN must be set")?,
            llm_model: env::var("LLM_MODEL").context("LLM_MODEL must be set")?,
        })
    }
}
