//! Advice generator: first matching rule from an ordered decision list

use crate::lexicon::{contains_any, AdviceCondition, AdviceRule, ADVICE_RULES, DEFAULT_ADVICE};

pub struct AdviceGenerator;

impl AdviceGenerator {
    pub fn advise(text: &str, positive: usize, negative: usize) -> &'static str {
        Self::matching_rule(text, positive, negative)
            .map(|rule| rule.message)
            .unwrap_or(DEFAULT_ADVICE)
    }

    /// The first rule whose condition holds, `None` for the default message
    pub fn matching_rule(
        text: &str,
        positive: usize,
        negative: usize,
    ) -> Option<&'static AdviceRule> {
        let lowered = text.to_lowercase();

        ADVICE_RULES.iter().find(|rule| match rule.condition {
            AdviceCondition::ContainsAny(phrases) => contains_any(&lowered, phrases),
            AdviceCondition::PositiveDominates => positive > negative * 2,
        })
    }
}
