//! Feedback analyzer port.
//!
//! The NLP collaborator that turns a raw comment into an `InitialAnalysis`
//! (emotion, stress, categories, summary). Treated as a black box.

use async_trait::async_trait;

use crate::domain::feedback::InitialAnalysis;

/// Errors from the analysis collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis model unavailable: {0}")]
    Unavailable(String),

    #[error("Analysis failed: {0}")]
    Failed(String),
}

/// Port for scoring a single feedback comment.
///
/// Failure is fatal for that comment; callers do not retry.
#[async_trait]
pub trait FeedbackAnalyzer: Send + Sync {
    /// Analyze one comment.
    ///
    /// Empty or non-informative text should yield
    /// [`InitialAnalysis::non_informative`] rather than an error.
    async fn analyze(&self, text: &str) -> Result<InitialAnalysis, AnalysisError>;
}
