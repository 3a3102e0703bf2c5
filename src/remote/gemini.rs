//! Gemini API client for remote emotion analysis
//!
//! Uses a long-lived reqwest::Client for connection pooling.
//! One POST per request, no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

use super::schema::{self, RemoteAnalysis};
use super::RemoteAnalyzer;
use crate::config::Config;
use crate::error::AnalysisError;
use crate::Result;

pub const DEFAULT_MODEL: &str = "gemini-pro";
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Placeholder key shipped in sample configs; never sent upstream
pub const DEMO_API_KEY: &str = "demo";

/// Longest slice of an error body kept in error messages
const ERROR_BODY_LIMIT: usize = 300;

/// Full `generateContent` endpoint for a model name
pub fn endpoint_for_model(model: &str) -> String {
    format!("{}/{}:generateContent", API_BASE_URL, model)
}

/// The key if it can actually be used: present, non-blank, not the demo sentinel
pub fn usable_api_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != DEMO_API_KEY)
}

/// Reusable Gemini analyzer (connection-pooled)
pub struct GeminiAnalyzer {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GeminiAnalyzer {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, endpoint_for_model(DEFAULT_MODEL))
    }

    pub fn with_endpoint(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build pooled HTTP client, using defaults: {}", e);
                Client::new()
            });

        Self {
            client,
            api_key,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_endpoint(config.gemini_api_key.clone(), config.gemini_endpoint.clone())
    }

    fn api_key(&self) -> Option<&str> {
        usable_api_key(self.api_key.as_deref())
    }

    /// Send the prompt and return the model's raw text answer
    async fn generate(&self, api_key: &str, prompt: String) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        info!("Calling Gemini API");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // Strip the URL: it carries the API key
                let e = e.without_url();
                error!("Gemini API request failed: {}", e);
                AnalysisError::RemoteHttpError(format!("Gemini API request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error response ({}): {}", status, error_text);
            return Err(AnalysisError::RemoteHttpError(format!(
                "API error: {} {}",
                status.as_u16(),
                truncate(&error_text, ERROR_BODY_LIMIT)
            )));
        }

        let body = response.text().await.map_err(|e| {
            AnalysisError::RemoteHttpError(format!(
                "Failed to read Gemini response body: {}",
                e.without_url()
            ))
        })?;

        extract_answer(&body)
    }
}

#[async_trait]
impl RemoteAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    async fn fetch(&self, text: &str) -> Result<RemoteAnalysis> {
        let api_key = self.api_key().ok_or_else(|| {
            AnalysisError::RemoteUnavailable(
                "API key not configured. Using enhanced text analysis.".to_string(),
            )
        })?;

        let answer = self.generate(api_key, build_prompt(text)).await?;
        let analysis = schema::parse_analysis(&answer)?;

        info!(
            dominant = %analysis.dominant_emotion,
            "Gemini analysis received"
        );

        Ok(analysis)
    }
}

/// Build the single analysis instruction sent to the model
fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following text for emotions, sentiment, and provide advice.
Return your response as a valid JSON object with this exact structure:
{{
  "emotions": {{
    "joy": number,
    "sadness": number,
    "anger": number,
    "fear": number,
    "surprise": number,
    "love": number,
    "neutral": number
  }},
  "dominantEmotion": string,
  "sentiment": string,
  "sentimentScore": number,
  "advice": string,
  "additionalAspects": {{
    "stressLevel": number,
    "confidence": number,
    "energy": number,
    "socialTendency": number
  }}
}}

Emotion values are percentages that sum to 100. sentimentScore ranges from -100 to 100.
All additionalAspects values range from 0 to 100.

Text to analyze: "{}""#,
        text
    )
}

/// Pull the model's text out of the provider envelope
fn extract_answer(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        AnalysisError::RemoteParseError(format!("Gemini response is not valid JSON: {}", e))
    })?;

    let envelope: GeminiResponse = serde_json::from_value(value).map_err(|e| {
        AnalysisError::RemoteFormatError(format!("Unexpected API response format: {}", e))
    })?;

    let candidate_text = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text);

    let prediction_text = || {
        envelope
            .predictions
            .into_iter()
            .next()
            .and_then(|p| p.content)
    };

    candidate_text
        .or_else(prediction_text)
        .ok_or_else(|| {
            AnalysisError::RemoteFormatError("Unexpected API response format".to_string())
        })
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    content: Option<String>,
}
