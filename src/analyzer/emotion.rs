//! Emotion scorer: text to normalized per-emotion percentages

use tracing::debug;

use super::round_half_up;
use crate::lexicon::{
    whitespace_word_count, WordCounts, EMOTION_LEXICON, LENGTH_BONUS_DIVISOR, MAX_LENGTH_BONUS,
    MIN_SIGNAL_CATEGORIES, NEUTRAL_FLOOR, SIGNAL_CUTOFF, SUM_TOLERANCE,
};
use crate::models::{Emotion, EmotionScores};

pub struct EmotionScorer;

impl EmotionScorer {
    /// Score every emotion category and normalize to percentages.
    ///
    /// 1. weighted whole-word keyword hits per category
    /// 2. plus a length bonus shared by all categories
    /// 3. percentage of the grand total
    /// 4. neutral floor when fewer than two categories carry signal
    /// 5. rescale toward a total of 100
    pub fn score(text: &str) -> EmotionScores {
        let counts = WordCounts::new(text);
        let word_count = whitespace_word_count(text) as f64;
        let length_bonus = (word_count / LENGTH_BONUS_DIVISOR).min(MAX_LENGTH_BONUS);

        let raw: Vec<(Emotion, f64)> = EMOTION_LEXICON
            .iter()
            .map(|category| {
                let hits = counts.count_all(category.words) as f64;
                (category.emotion, hits * category.weight + length_bonus)
            })
            .collect();

        let total: f64 = raw.iter().map(|(_, score)| score).sum();

        if total <= 0.0 {
            // Only reachable for text without a single token
            debug!("No scorable tokens, reporting a neutral profile");
            return EmotionScores {
                neutral: 100,
                ..Default::default()
            };
        }

        let mut percentages = EmotionScores::default();
        for (emotion, score) in &raw {
            let pct = round_half_up(100.0 * score / total).clamp(0, 100);
            *percentages.slot_mut(*emotion) = pct as u32;
        }

        let signal_categories = percentages
            .iter()
            .filter(|(_, pct)| *pct > SIGNAL_CUTOFF)
            .count();

        if signal_categories < MIN_SIGNAL_CATEGORIES {
            percentages.neutral = percentages.neutral.max(NEUTRAL_FLOOR);
        }

        rescale(Emotion::ALL.map(|e| percentages.get(e) as f64))
    }
}

/// Rescale non-negative weights (in `Emotion::ALL` order) so they total
/// roughly 100, then pull any drift beyond the tolerance back into range.
///
/// All-zero input yields an all-zero profile.
pub(crate) fn rescale(values: [f64; 7]) -> EmotionScores {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return EmotionScores::default();
    }

    let factor = 100.0 / total;
    let mut scores = EmotionScores::default();
    for (emotion, value) in Emotion::ALL.into_iter().zip(values) {
        *scores.slot_mut(emotion) = round_half_up(value * factor).clamp(0, 100) as u32;
    }

    enforce_tolerance(&mut scores);
    scores
}

/// Move the total inside `100 ± SUM_TOLERANCE`, one point per category,
/// largest categories first. Totals already in range are untouched.
fn enforce_tolerance(scores: &mut EmotionScores) {
    let drift = scores.total() as i64 - 100;
    let mut excess = if drift > SUM_TOLERANCE {
        drift - SUM_TOLERANCE
    } else if drift < -SUM_TOLERANCE {
        drift + SUM_TOLERANCE
    } else {
        return;
    };

    let mut ranked = Emotion::ALL.to_vec();
    ranked.sort_by_key(|e| std::cmp::Reverse(scores.get(*e)));

    for emotion in ranked {
        if excess == 0 {
            break;
        }

        let slot = scores.slot_mut(emotion);
        if excess > 0 && *slot > 0 {
            *slot -= 1;
            excess -= 1;
        } else if excess < 0 && *slot < 100 {
            *slot += 1;
            excess += 1;
        }
    }

    debug!(drift, "Emotion total pulled back into tolerance");
}
