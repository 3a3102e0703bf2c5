//! EmotionSense text analysis engine
//!
//! Turns a piece of free text into an emotional profile:
//! - Seven emotion percentages plus the dominant emotion
//! - A sentiment label and score in [-100, 100]
//! - Stress, confidence, energy and social tendency aspects
//! - One piece of rule-based advice
//! - Typing speed telemetry when timestamps are supplied
//!
//! A remote Gemini analyzer is tried first when configured; any failure
//! falls back to the deterministic local analyzer, so a non-empty input
//! always produces a result.
//!
//! FLOW:
//! INPUT → REMOTE? → VALIDATE → (ACCEPT | LOCAL FALLBACK) → TELEMETRY → COMPLETE

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod models;
pub mod orchestrator;
pub mod remote;
pub mod typing;

pub use error::{AnalysisError, Result};

// Re-export common types
pub use analyzer::LocalAnalyzer;
pub use config::Config;
pub use models::*;
pub use orchestrator::{analyze, Orchestrator};
