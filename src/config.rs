//! Environment configuration
//!
//! Binaries call `dotenv::dotenv().ok()` first, then `Config::from_env()`.

use std::env;
use std::time::Duration;

use crate::error::AnalysisError;
use crate::remote::gemini::{endpoint_for_model, usable_api_key, DEFAULT_MODEL};
use crate::Result;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent, blank or `"demo"` keeps the engine local-only
    pub gemini_api_key: Option<String>,
    pub gemini_endpoint: String,
    /// Optional cap on the remote call; expiry triggers the local fallback
    pub remote_timeout: Option<Duration>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let gemini_api_key = non_blank("GEMINI_API_KEY");

        let gemini_endpoint = match non_blank("GEMINI_API_URL") {
            Some(url) => url,
            None => endpoint_for_model(
                non_blank("GEMINI_MODEL").as_deref().unwrap_or(DEFAULT_MODEL),
            ),
        };

        let remote_timeout = non_blank("REMOTE_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    AnalysisError::ConfigError(format!(
                        "REMOTE_TIMEOUT_SECS must be a whole number of seconds: {}",
                        e
                    ))
                })
            })
            .transpose()?;

        let port = match non_blank("PORT").or_else(|| non_blank("API_PORT")) {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                AnalysisError::ConfigError(format!("Invalid port {:?}: {}", raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gemini_api_key,
            gemini_endpoint,
            remote_timeout,
            port,
        })
    }

    /// Whether requests will try the remote analyzer first
    pub fn remote_enabled(&self) -> bool {
        usable_api_key(self.gemini_api_key.as_deref()).is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_endpoint: endpoint_for_model(DEFAULT_MODEL),
            remote_timeout: None,
            port: DEFAULT_PORT,
        }
    }
}
