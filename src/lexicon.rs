//! Lexicon tables and policy constants for the local analyzer
//!
//! Everything the heuristic analyzer knows lives here as immutable data:
//! weighted emotion keyword sets, sentiment polarity lists, aspect keywords
//! and the ordered advice rules.

use std::collections::HashMap;

use crate::models::Emotion;

/// One weighted keyword set
#[derive(Debug, Clone, Copy)]
pub struct EmotionCategory {
    pub emotion: Emotion,
    pub words: &'static [&'static str],
    pub weight: f64,
}

/// Listed in `Emotion::ALL` order
pub const EMOTION_LEXICON: &[EmotionCategory] = &[
    EmotionCategory {
        emotion: Emotion::Joy,
        words: &[
            "happy", "joy", "excited", "great", "wonderful", "love", "laugh", "smile", "fun",
            "enjoy",
        ],
        weight: 2.0,
    },
    EmotionCategory {
        emotion: Emotion::Sadness,
        words: &[
            "sad", "unhappy", "depressed", "cry", "tears", "miss", "grief", "heartbreak",
            "lonely",
        ],
        weight: 2.0,
    },
    EmotionCategory {
        emotion: Emotion::Anger,
        words: &[
            "angry", "mad", "furious", "hate", "rage", "annoyed", "frustrated", "outrage",
        ],
        weight: 2.0,
    },
    EmotionCategory {
        emotion: Emotion::Fear,
        words: &[
            "scared", "afraid", "fear", "anxious", "worry", "nervous", "terrified", "panic",
        ],
        weight: 2.0,
    },
    EmotionCategory {
        emotion: Emotion::Surprise,
        words: &["surprise", "shock", "amazed", "astonished", "unexpected", "wow"],
        weight: 1.5,
    },
    EmotionCategory {
        emotion: Emotion::Love,
        words: &[
            "love", "adore", "care", "affection", "romance", "passion", "crush", "cherish",
        ],
        weight: 2.0,
    },
    EmotionCategory {
        emotion: Emotion::Neutral,
        words: &["okay", "fine", "normal", "regular", "meh", "whatever", "neutral"],
        weight: 1.0,
    },
];

pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "good", "great", "love", "excited", "joy", "wonderful", "nice", "awesome", "best",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "angry", "hate", "scared", "fear", "terrible", "awful", "horrible", "worst",
];

//
// ================= Scoring policy =================
//

/// Length bonus per category is `min(MAX_LENGTH_BONUS, words / LENGTH_BONUS_DIVISOR)`
pub const MAX_LENGTH_BONUS: f64 = 10.0;
pub const LENGTH_BONUS_DIVISOR: f64 = 10.0;

/// A category "carries signal" above this percentage
pub const SIGNAL_CUTOFF: u32 = 10;
pub const MIN_SIGNAL_CATEGORIES: usize = 2;
pub const NEUTRAL_FLOOR: u32 = 30;

/// Accepted drift of the emotion total away from 100
pub const SUM_TOLERANCE: i64 = 2;

pub const POSITIVE_THRESHOLD: i32 = 20;
pub const NEGATIVE_THRESHOLD: i32 = -20;

//
// ================= Aspects =================
//

pub const STRESS_KEYWORDS: &[&str] = &["stress"];
pub const SOCIAL_KEYWORDS: &[&str] = &["friend", "family", "we"];

//
// ================= Advice rules =================
//

#[derive(Debug, Clone, Copy)]
pub enum AdviceCondition {
    /// Lowercased text contains any of the phrases
    ContainsAny(&'static [&'static str]),
    /// More than twice as many positive as negative words
    PositiveDominates,
}

#[derive(Debug, Clone, Copy)]
pub struct AdviceRule {
    pub name: &'static str,
    pub condition: AdviceCondition,
    pub message: &'static str,
}

/// Evaluated top to bottom; first match wins
pub const ADVICE_RULES: &[AdviceRule] = &[
    AdviceRule {
        name: "distress_support",
        condition: AdviceCondition::ContainsAny(&["not well", "not good", "depressed"]),
        message: "It sounds like you're going through a tough time. Remember that it's okay to not be okay. Consider reaching out to someone you trust or engaging in self-care activities.",
    },
    AdviceRule {
        name: "savor_positivity",
        condition: AdviceCondition::PositiveDominates,
        message: "It's great that you're feeling positive! Try to savor this moment and consider what brought you this happiness.",
    },
    AdviceRule {
        name: "anger_coping",
        condition: AdviceCondition::ContainsAny(&["angry", "mad", "frustrated"]),
        message: "Anger is a natural emotion. Try to understand its source and channel it constructively. Physical activity can help release angry energy.",
    },
    AdviceRule {
        name: "fear_coping",
        condition: AdviceCondition::ContainsAny(&["scared", "afraid", "anxious"]),
        message: "It's normal to feel fear sometimes. Try to identify what's causing these feelings and break it down into manageable steps. Deep breathing exercises can help.",
    },
];

pub const DEFAULT_ADVICE: &str =
    "Take a moment to reflect on your feelings. Consider talking to someone you trust.";

//
// ================= Word matching =================
//

/// Case-insensitive whole-word occurrence counts for one text.
///
/// A word is a maximal run of ASCII letters, digits or `_`; everything else
/// (punctuation, whitespace, non-ASCII) is a boundary.
#[derive(Debug, Default)]
pub struct WordCounts {
    counts: HashMap<String, usize>,
}

impl WordCounts {
    pub fn new(text: &str) -> Self {
        let mut counts = HashMap::new();

        for token in text
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .filter(|t| !t.is_empty())
        {
            *counts.entry(token.to_ascii_lowercase()).or_insert(0) += 1;
        }

        Self { counts }
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Total occurrences of every listed word
    pub fn count_all(&self, words: &[&str]) -> usize {
        words.iter().map(|w| self.count(w)).sum()
    }
}

/// Substring presence check over already-lowercased text
pub fn contains_any(lowered: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| lowered.contains(p))
}

/// Whitespace-separated token count. Leading and trailing whitespace
/// contributes no empty tokens.
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_word_count_ignores_padding() {
        assert_eq!(whitespace_word_count("a b"), 2);
        assert_eq!(whitespace_word_count("  a \n b\t "), 2);
        assert_eq!(whitespace_word_count("   "), 0);
    }

    #[test]
    fn test_lexicon_follows_emotion_order() {
        let order: Vec<Emotion> = EMOTION_LEXICON.iter().map(|c| c.emotion).collect();
        assert_eq!(order, Emotion::ALL.to_vec());
    }

    #[test]
    fn test_whole_word_matching() {
        let counts = WordCounts::new("Happy, HAPPY! unhappy happy_go happiness");
        assert_eq!(counts.count("happy"), 2);
        assert_eq!(counts.count("unhappy"), 1);
        assert_eq!(counts.count("happy_go"), 1);
        assert_eq!(counts.count("happiness"), 1);
    }

    #[test]
    fn test_apostrophes_split_words() {
        let counts = WordCounts::new("I'm scared");
        assert_eq!(counts.count("i"), 1);
        assert_eq!(counts.count("m"), 1);
        assert_eq!(counts.count("scared"), 1);
    }

    #[test]
    fn test_punctuation_only_has_no_words() {
        let counts = WordCounts::new("?!... --- !!!");
        assert_eq!(counts.count_all(POSITIVE_WORDS), 0);
        assert_eq!(counts.count_all(NEGATIVE_WORDS), 0);
    }

    #[test]
    fn test_contains_any_is_substring() {
        assert!(contains_any("we were there", SOCIAL_KEYWORDS));
        assert!(contains_any("my best friends", SOCIAL_KEYWORDS));
        assert!(!contains_any("alone at home", SOCIAL_KEYWORDS));
    }

    #[test]
    fn test_advice_rule_order() {
        let names: Vec<&str> = ADVICE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["distress_support", "savor_positivity", "anger_coping", "fear_coping"]
        );
    }
}
