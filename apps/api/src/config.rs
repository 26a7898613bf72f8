use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Checked in order; the first non-empty value wins.
const API_KEY_VARS: [&str; 2] = ["VITE_GEMINI_API_KEY", "GEMINI_API_KEY"];

/// Application configuration loaded from environment variables.
/// A missing API key is not an error: the service runs in degraded mode.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: resolve_api_key(
                API_KEY_VARS.iter().map(|key| std::env::var(key).ok()),
            ),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_base_url: env_or("GEMINI_API_BASE_URL", DEFAULT_BASE_URL),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// First candidate that is set and non-empty.
fn resolve_api_key(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
