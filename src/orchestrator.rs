//! Fallback orchestrator - the single entry point for an analysis
//!
//! INPUT → REMOTE? → (ACCEPT | LOCAL FALLBACK) → TELEMETRY → COMPLETE
//!
//! Never fails for a validated input: every remote failure is absorbed,
//! logged, and reported back as an informational notice next to a local
//! result.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analyzer::LocalAnalyzer;
use crate::config::Config;
use crate::error::AnalysisError;
use crate::models::{AnalysisInput, AnalysisOutcome, AnalysisResult, AnalysisSource};
use crate::remote::{GeminiAnalyzer, RemoteAnalysis, RemoteAnalyzer};
use crate::typing;
use crate::Result;

pub struct Orchestrator {
    remote: Box<dyn RemoteAnalyzer>,
    local: LocalAnalyzer,
    remote_timeout: Option<Duration>,
}

impl Orchestrator {
    pub fn new(remote: Box<dyn RemoteAnalyzer>) -> Self {
        Self {
            remote,
            local: LocalAnalyzer::new(),
            remote_timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(GeminiAnalyzer::from_config(config))).with_timeout(config.remote_timeout)
    }

    /// Cap the remote call; expiry counts as an HTTP failure
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.remote_timeout = timeout;
        self
    }

    pub fn remote_name(&self) -> &'static str {
        self.remote.name()
    }

    pub fn remote_configured(&self) -> bool {
        self.remote.is_configured()
    }

    pub async fn analyze(&self, input: &AnalysisInput) -> AnalysisOutcome {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        let text = input.text();

        let (report, source, notice) = match self.fetch_remote(text).await {
            Ok(remote) => (
                remote.into_report(text, &self.local),
                AnalysisSource::Remote,
                None,
            ),
            Err(e) => {
                if matches!(e, AnalysisError::RemoteUnavailable(_)) {
                    info!(
                        %request_id,
                        reason = %e,
                        "Remote analyzer not configured, using local analyzer"
                    );
                } else {
                    warn!(
                        %request_id,
                        error = %e,
                        "Remote analysis failed, falling back to local analyzer"
                    );
                }
                (self.local.analyze(text), AnalysisSource::Local, Some(e.to_string()))
            }
        };

        let telemetry = typing::telemetry(text, input.typing_start(), input.typing_end());

        info!(
            %request_id,
            %source,
            dominant = %report.dominant_emotion,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Analysis completed"
        );

        AnalysisOutcome {
            request_id,
            source,
            result: AnalysisResult::from_report(report, telemetry),
            notice,
        }
    }

    async fn fetch_remote(&self, text: &str) -> Result<RemoteAnalysis> {
        match self.remote_timeout {
            Some(limit) => tokio::time::timeout(limit, self.remote.fetch(text))
                .await
                .map_err(|_| {
                    AnalysisError::RemoteHttpError(format!(
                        "Remote analysis timed out after {}ms",
                        limit.as_millis()
                    ))
                })?,
            None => self.remote.fetch(text).await,
        }
    }
}

/// Validate the request and run it through a Gemini-backed orchestrator.
///
/// Blank text is rejected with `ValidationError` before anything is scored.
pub async fn analyze(
    text: &str,
    typing_start: Option<DateTime<Utc>>,
    typing_end: Option<DateTime<Utc>>,
    api_key: Option<&str>,
) -> Result<AnalysisOutcome> {
    let input = AnalysisInput::new(text, typing_start, typing_end)?;
    let remote = GeminiAnalyzer::new(api_key.map(str::to_string));
    let orchestrator = Orchestrator::new(Box::new(remote));
    Ok(orchestrator.analyze(&input).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::DEFAULT_ADVICE;
    use crate::models::{
        AdditionalAspects, Emotion, EmotionScores, SentimentLabel, SentimentResult,
    };
    use async_trait::async_trait;
    use chrono::TimeZone;

    /// Remote that always fails with a fixed error
    struct FailingRemote(fn() -> AnalysisError);

    #[async_trait]
    impl RemoteAnalyzer for FailingRemote {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn fetch(&self, _text: &str) -> Result<RemoteAnalysis> {
            Err((self.0)())
        }
    }

    /// Remote that answers with a canned analysis, optionally after a delay
    struct CannedRemote {
        analysis: RemoteAnalysis,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl RemoteAnalyzer for CannedRemote {
        fn name(&self) -> &'static str {
            "canned"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn fetch(&self, _text: &str) -> Result<RemoteAnalysis> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.analysis.clone())
        }
    }

    fn canned() -> RemoteAnalysis {
        RemoteAnalysis {
            emotions: EmotionScores {
                love: 55,
                joy: 25,
                neutral: 20,
                ..Default::default()
            },
            dominant_emotion: Emotion::Love,
            sentiment: Some(SentimentResult::from_score(64)),
            advice: Some("Tell them how you feel.".to_string()),
            additional_aspects: Some(AdditionalAspects {
                stress_level: 5,
                confidence: 77,
                energy: 70,
                social_tendency: 90,
            }),
        }
    }

    fn at(millis: i64) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(millis).single()
    }

    fn input(text: &str) -> AnalysisInput {
        AnalysisInput::new(text, at(0), at(60_000)).unwrap()
    }

    #[tokio::test]
    async fn test_remote_success_merges_telemetry() {
        let orchestrator = Orchestrator::new(Box::new(CannedRemote {
            analysis: canned(),
            delay: None,
        }));

        let outcome = orchestrator.analyze(&input("one two three four")).await;

        assert_eq!(outcome.source, AnalysisSource::Remote);
        assert!(outcome.notice.is_none());
        assert_eq!(outcome.result.dominant_emotion, Emotion::Love);
        assert_eq!(outcome.result.advice, "Tell them how you feel.");
        assert_eq!(outcome.result.sentiment.label, SentimentLabel::Positive);
        assert_eq!(outcome.result.telemetry.word_count, 4);
        assert_eq!(outcome.result.telemetry.wpm, 4);
    }

    #[tokio::test]
    async fn test_every_remote_failure_falls_back() {
        let failures: [fn() -> AnalysisError; 4] = [
            || AnalysisError::RemoteUnavailable("no key".into()),
            || AnalysisError::RemoteHttpError("API error: 500".into()),
            || AnalysisError::RemoteFormatError("missing field `dominantEmotion`".into()),
            || AnalysisError::RemoteParseError("expected value".into()),
        ];

        for failure in failures {
            let expected = failure().to_string();
            let orchestrator = Orchestrator::new(Box::new(FailingRemote(failure)));
            let outcome = orchestrator
                .analyze(&input("I am not good and angry"))
                .await;

            assert_eq!(outcome.source, AnalysisSource::Local);
            assert_eq!(outcome.notice.as_deref(), Some(expected.as_str()));
            assert!(outcome
                .result
                .advice
                .starts_with("It sounds like you're going through a tough time"));
            assert_eq!(outcome.result.dominant_emotion, Emotion::Anger);
            assert_eq!(outcome.result.telemetry.word_count, 6);
            assert_eq!(outcome.result.telemetry.wpm, 6);
        }
    }

    #[tokio::test]
    async fn test_timeout_triggers_fallback() {
        let orchestrator = Orchestrator::new(Box::new(CannedRemote {
            analysis: canned(),
            delay: Some(Duration::from_secs(5)),
        }))
        .with_timeout(Some(Duration::from_millis(20)));

        let outcome = orchestrator.analyze(&input("hello there")).await;

        assert_eq!(outcome.source, AnalysisSource::Local);
        let notice = outcome.notice.unwrap_or_default();
        assert!(notice.starts_with("Remote HTTP error"), "notice: {notice}");
        assert!(notice.contains("timed out"));
        assert_eq!(outcome.result.advice, DEFAULT_ADVICE);
    }

    #[tokio::test]
    async fn test_free_function_rejects_blank_text() {
        let err = analyze("  \n ", None, None, Some("key")).await.unwrap_err();
        assert!(matches!(err, AnalysisError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_free_function_demo_key_runs_locally() {
        let outcome = analyze("I love my friends", None, None, Some("demo"))
            .await
            .unwrap();

        assert_eq!(outcome.source, AnalysisSource::Local);
        assert_eq!(outcome.result.telemetry.wpm, 0);
        assert_eq!(outcome.result.telemetry.word_count, 0);
        assert_eq!(outcome.result.additional_aspects.social_tendency, 75);
    }

    #[test]
    fn test_from_config_reports_remote_state() {
        let orchestrator = Orchestrator::from_config(&Config::default());
        assert_eq!(orchestrator.remote_name(), "gemini");
        assert!(!orchestrator.remote_configured());
    }
}
