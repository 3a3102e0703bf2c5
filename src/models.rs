//! Core data models for the emotion analysis engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::lexicon::{NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Love,
    Neutral,
}

impl Emotion {
    /// Fixed iteration order; dominant-emotion ties resolve to the earliest entry.
    pub const ALL: [Emotion; 7] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Love,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Love => "love",
            Emotion::Neutral => "neutral",
        }
    }

    /// Case-insensitive lookup by name
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Fixed policy: strictly above +20 is positive, strictly below -20 negative.
    pub fn from_score(score: i32) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Remote,
    Local,
}

//
// ================= Emotion Scores =================
//

/// Integer percentage per emotion, each in [0,100]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmotionScores {
    pub joy: u32,
    pub sadness: u32,
    pub anger: u32,
    pub fear: u32,
    pub surprise: u32,
    pub love: u32,
    pub neutral: u32,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> u32 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Love => self.love,
            Emotion::Neutral => self.neutral,
        }
    }

    pub(crate) fn slot_mut(&mut self, emotion: Emotion) -> &mut u32 {
        match emotion {
            Emotion::Joy => &mut self.joy,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Anger => &mut self.anger,
            Emotion::Fear => &mut self.fear,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Love => &mut self.love,
            Emotion::Neutral => &mut self.neutral,
        }
    }

    /// Iterate in the fixed emotion order
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u32)> + '_ {
        Emotion::ALL.into_iter().map(move |e| (e, self.get(e)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Emotion with the highest score; first in iteration order wins ties.
    /// An all-zero profile reports `Neutral`.
    pub fn dominant(&self) -> Emotion {
        let mut dominant = Emotion::Neutral;
        let mut highest = 0;

        for (emotion, score) in self.iter() {
            if score > highest {
                highest = score;
                dominant = emotion;
            }
        }

        dominant
    }

    /// Whether `emotion` shares the maximum score
    pub fn is_max(&self, emotion: Emotion) -> bool {
        let max = self.iter().map(|(_, v)| v).max().unwrap_or(0);
        self.get(emotion) == max
    }
}

//
// ================= Sentiment & Aspects =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentResult {
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    #[serde(rename = "sentimentScore")]
    pub score: i32,
}

impl SentimentResult {
    /// Clamp to [-100,100] and derive the label from the fixed thresholds
    pub fn from_score(score: i32) -> Self {
        let score = score.clamp(-100, 100);
        Self {
            label: SentimentLabel::from_score(score),
            score,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalAspects {
    pub stress_level: u32,
    pub confidence: u32,
    pub energy: u32,
    pub social_tendency: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypingTelemetry {
    pub wpm: u64,
    pub word_count: u64,
}

//
// ================= Input =================
//

/// One analysis request. Only constructible with non-blank text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    text: String,
    typing_start: Option<DateTime<Utc>>,
    typing_end: Option<DateTime<Utc>>,
}

impl AnalysisInput {
    pub fn new(
        text: impl Into<String>,
        typing_start: Option<DateTime<Utc>>,
        typing_end: Option<DateTime<Utc>>,
    ) -> crate::Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalysisError::ValidationError(
                "Please enter some text to analyze.".to_string(),
            ));
        }

        Ok(Self {
            text,
            typing_start,
            typing_end,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn typing_start(&self) -> Option<DateTime<Utc>> {
        self.typing_start
    }

    pub fn typing_end(&self) -> Option<DateTime<Utc>> {
        self.typing_end
    }
}

//
// ================= Results =================
//

/// Emotional profile without typing telemetry.
///
/// This is the shape the remote service must return and the shape the
/// local analyzer produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub emotions: EmotionScores,
    pub dominant_emotion: Emotion,
    #[serde(flatten)]
    pub sentiment: SentimentResult,
    pub advice: String,
    pub additional_aspects: AdditionalAspects,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub emotions: EmotionScores,
    pub dominant_emotion: Emotion,
    #[serde(flatten)]
    pub sentiment: SentimentResult,
    pub advice: String,
    pub additional_aspects: AdditionalAspects,
    #[serde(flatten)]
    pub telemetry: TypingTelemetry,
}

impl AnalysisResult {
    pub fn from_report(report: AnalysisReport, telemetry: TypingTelemetry) -> Self {
        Self {
            emotions: report.emotions,
            dominant_emotion: report.dominant_emotion,
            sentiment: report.sentiment,
            advice: report.advice,
            additional_aspects: report.additional_aspects,
            telemetry,
        }
    }
}

/// What the orchestrator hands back for every request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub request_id: Uuid,
    pub source: AnalysisSource,
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// Why the remote path was abandoned, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisSource::Remote => "remote",
            AnalysisSource::Local => "local",
        };
        write!(f, "{}", s)
    }
}
