//! Local heuristic analyzer
//!
//! Deterministic, network-free analysis used whenever the remote service
//! is unavailable or returns something unusable. Every decision is driven
//! by the tables in [`crate::lexicon`].

pub mod advice;
pub mod aspects;
pub mod emotion;
pub mod sentiment;

pub use advice::AdviceGenerator;
pub use aspects::AspectCalculator;
pub use emotion::EmotionScorer;
pub use sentiment::{SentimentCounts, SentimentEstimator};

use tracing::debug;

use crate::models::AnalysisReport;

/// Composes scorer, estimator, aspect calculator and advice generator
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAnalyzer;

impl LocalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let emotions = EmotionScorer::score(text);
        let counts = SentimentEstimator::count(text);
        let sentiment = SentimentEstimator::from_counts(counts);
        let additional_aspects = AspectCalculator::derive(text, counts.positive, counts.negative);
        let advice = AdviceGenerator::advise(text, counts.positive, counts.negative);

        let dominant_emotion = emotions.dominant();

        debug!(
            dominant = %dominant_emotion,
            sentiment = %sentiment.label,
            positive = counts.positive,
            negative = counts.negative,
            "Local analysis completed"
        );

        AnalysisReport {
            emotions,
            dominant_emotion,
            sentiment,
            advice: advice.to_string(),
            additional_aspects,
        }
    }
}

/// Round half toward positive infinity (`-2.5 -> -2`, `2.5 -> 3`)
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
