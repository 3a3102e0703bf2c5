//! Extraction and validation of the remote analysis payload
//!
//! The model answers in free-form text that should contain one JSON object.
//! The first `{` opens that object; a streaming deserializer reads exactly
//! one value from there (brace matching that respects strings), and anything
//! after it is ignored. The value is then checked against the expected
//! schema before any of it is trusted.

use serde::Deserialize;
use serde_json::Value;
use std::cell::OnceCell;
use tracing::{debug, warn};

use crate::analyzer::emotion::rescale;
use crate::analyzer::{round_half_up, LocalAnalyzer};
use crate::error::AnalysisError;
use crate::models::{
    AdditionalAspects, AnalysisReport, Emotion, EmotionScores, SentimentLabel, SentimentResult,
};
use crate::Result;

/// A validated remote response.
///
/// Only `emotions` and `dominant_emotion` are mandatory; the other fields
/// are backfilled from the local analyzer when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteAnalysis {
    pub emotions: EmotionScores,
    pub dominant_emotion: Emotion,
    pub sentiment: Option<SentimentResult>,
    pub advice: Option<String>,
    pub additional_aspects: Option<AdditionalAspects>,
}

impl RemoteAnalysis {
    /// Complete the response into a full report, running the local analyzer
    /// only if some optional field is missing.
    pub fn into_report(self, text: &str, local: &LocalAnalyzer) -> AnalysisReport {
        let backfill = OnceCell::new();
        let local_report = || {
            backfill.get_or_init(|| {
                debug!("Remote response incomplete, backfilling from local analyzer");
                local.analyze(text)
            })
        };

        let sentiment = self.sentiment.unwrap_or_else(|| local_report().sentiment);
        let advice = self.advice.unwrap_or_else(|| local_report().advice.clone());
        let additional_aspects = self
            .additional_aspects
            .unwrap_or_else(|| local_report().additional_aspects);

        AnalysisReport {
            emotions: self.emotions,
            dominant_emotion: self.dominant_emotion,
            sentiment,
            advice,
            additional_aspects,
        }
    }
}

//
// ================= Raw payload =================
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    emotions: RawEmotions,
    dominant_emotion: String,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    sentiment_score: Option<f64>,
    #[serde(default)]
    advice: Option<String>,
    #[serde(default)]
    additional_aspects: Option<RawAspects>,
}

#[derive(Debug, Deserialize)]
struct RawEmotions {
    joy: f64,
    sadness: f64,
    anger: f64,
    fear: f64,
    surprise: f64,
    love: f64,
    neutral: f64,
}

impl RawEmotions {
    /// In `Emotion::ALL` order
    fn values(&self) -> [f64; 7] {
        [
            self.joy,
            self.sadness,
            self.anger,
            self.fear,
            self.surprise,
            self.love,
            self.neutral,
        ]
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAspects {
    stress_level: f64,
    confidence: f64,
    energy: f64,
    social_tendency: f64,
}

//
// ================= Parsing =================
//

/// Extract, parse and validate the analysis embedded in model output
pub fn parse_analysis(text: &str) -> Result<RemoteAnalysis> {
    let value = extract_json_object(text)?;
    validate(value)
}

/// Parse the first JSON object embedded in `text`
pub fn extract_json_object(text: &str) -> Result<Value> {
    let start = text.find('{').ok_or_else(|| {
        AnalysisError::RemoteFormatError(
            "Invalid response format from API: no JSON object".to_string(),
        )
    })?;

    let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();

    match stream.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(AnalysisError::RemoteParseError(format!(
            "Malformed JSON in API response: {}",
            e
        ))),
        None => Err(AnalysisError::RemoteFormatError(
            "Invalid response format from API: empty JSON block".to_string(),
        )),
    }
}

/// Check a parsed payload against the analysis schema and normalize it
pub fn validate(value: Value) -> Result<RemoteAnalysis> {
    let raw: RawAnalysis = serde_json::from_value(value).map_err(|e| {
        AnalysisError::RemoteFormatError(format!("Incomplete analysis result from API: {}", e))
    })?;

    let values = raw.emotions.values();
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(AnalysisError::RemoteFormatError(
            "Emotion scores must be non-negative numbers".to_string(),
        ));
    }
    if values.iter().all(|v| *v == 0.0) {
        return Err(AnalysisError::RemoteFormatError(
            "Emotion scores are all zero".to_string(),
        ));
    }

    let emotions = rescale(values);

    let claimed = Emotion::parse(&raw.dominant_emotion).ok_or_else(|| {
        AnalysisError::RemoteFormatError(format!(
            "Unknown dominant emotion: {}",
            raw.dominant_emotion
        ))
    })?;

    let dominant_emotion = if emotions.is_max(claimed) {
        claimed
    } else {
        let computed = emotions.dominant();
        warn!(
            claimed = %claimed,
            computed = %computed,
            "Remote dominant emotion disagrees with its scores, using the maximum"
        );
        computed
    };

    let claimed_label = raw
        .sentiment
        .as_deref()
        .map(parse_label)
        .transpose()?;

    let sentiment = raw.sentiment_score.map(|score| {
        let result = SentimentResult::from_score(round_half_up(score).clamp(-100, 100) as i32);
        if let Some(label) = claimed_label {
            if label != result.label {
                debug!(
                    claimed = %label,
                    derived = %result.label,
                    "Remote sentiment label re-derived from score"
                );
            }
        }
        result
    });

    let advice = raw
        .advice
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    let additional_aspects = raw.additional_aspects.map(|a| AdditionalAspects {
        stress_level: clamp_percent(a.stress_level),
        confidence: clamp_percent(a.confidence),
        energy: clamp_percent(a.energy),
        social_tendency: clamp_percent(a.social_tendency),
    });

    Ok(RemoteAnalysis {
        emotions,
        dominant_emotion,
        sentiment,
        advice,
        additional_aspects,
    })
}

fn parse_label(label: &str) -> Result<SentimentLabel> {
    match label.trim().to_lowercase().as_str() {
        "positive" => Ok(SentimentLabel::Positive),
        "negative" => Ok(SentimentLabel::Negative),
        "neutral" => Ok(SentimentLabel::Neutral),
        other => Err(AnalysisError::RemoteFormatError(format!(
            "Unknown sentiment label: {}",
            other
        ))),
    }
}

fn clamp_percent(value: f64) -> u32 {
    round_half_up(value).clamp(0, 100) as u32
}
