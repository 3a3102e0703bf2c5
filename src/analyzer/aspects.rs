//! Aspect calculator: stress, confidence, energy and social tendency
//!
//! Clamped linear combinations of polarity counts and keyword presence.
//! These are heuristic proxies, not psychological measurements; the
//! coefficients are fixed for output compatibility.

use crate::lexicon::{contains_any, SOCIAL_KEYWORDS, STRESS_KEYWORDS};
use crate::models::AdditionalAspects;

pub struct AspectCalculator;

impl AspectCalculator {
    pub fn derive(text: &str, positive: usize, negative: usize) -> AdditionalAspects {
        let lowered = text.to_lowercase();
        let positive = positive as i64;
        let negative = negative as i64;

        let stress_bonus = if contains_any(&lowered, STRESS_KEYWORDS) { 20 } else { 0 };
        let social_bonus = if contains_any(&lowered, SOCIAL_KEYWORDS) { 25 } else { 0 };

        AdditionalAspects {
            stress_level: clamp_percent(10 + 5 * negative + stress_bonus),
            confidence: clamp_percent(50 + 3 * positive - 2 * negative),
            energy: clamp_percent(60 + 2 * positive - negative),
            social_tendency: clamp_percent(50 + social_bonus),
        }
    }
}

fn clamp_percent(value: i64) -> u32 {
    value.clamp(0, 100) as u32
}
