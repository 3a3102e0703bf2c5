//! Remote analysis trait and implementations
//!
//! A remote analyzer makes exactly one outbound call per request and
//! surfaces every failure immediately; retry and fallback policy belong to
//! the orchestrator.

use async_trait::async_trait;

use crate::Result;

pub mod gemini;
pub mod schema;

pub use gemini::GeminiAnalyzer;
pub use schema::RemoteAnalysis;

#[async_trait]
pub trait RemoteAnalyzer: Send + Sync {
    /// Short provider name for logs and status reporting
    fn name(&self) -> &'static str;

    /// Whether a call could be attempted at all (credentials present)
    fn is_configured(&self) -> bool;

    /// Analyze `text` remotely and return a schema-validated response
    async fn fetch(&self, text: &str) -> Result<RemoteAnalysis>;
}
