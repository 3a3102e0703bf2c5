//! Sentiment estimator: signed polarity score and three-way label

use super::round_half_up;
use crate::lexicon::{WordCounts, NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::models::SentimentResult;

/// Raw polarity word hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
}

pub struct SentimentEstimator;

impl SentimentEstimator {
    pub fn estimate(text: &str) -> SentimentResult {
        Self::from_counts(Self::count(text))
    }

    pub fn count(text: &str) -> SentimentCounts {
        let counts = WordCounts::new(text);
        SentimentCounts {
            positive: counts.count_all(POSITIVE_WORDS),
            negative: counts.count_all(NEGATIVE_WORDS),
        }
    }

    /// `round(100 * (pos - neg) / max(1, pos + neg))`
    pub fn from_counts(counts: SentimentCounts) -> SentimentResult {
        let positive = counts.positive as f64;
        let negative = counts.negative as f64;
        let total = (positive + negative).max(1.0);

        let score = round_half_up(100.0 * (positive - negative) / total);
        SentimentResult::from_score(score as i32)
    }
}
