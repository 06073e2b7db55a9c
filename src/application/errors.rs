//! Errors surfaced by the triage flows.

use thiserror::Error;

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, InsightId};
use crate::ports::{AnalysisError, StoreError};

/// Failure of a start, reply, review or listing flow.
///
/// Bad employee input never shows up here: it resolves to "no follow-up" or
/// a close decision.
#[derive(Debug, Clone, Error)]
pub enum TriageError {
    /// The NLP collaborator failed; the comment is not triaged.
    #[error("Analysis unavailable: {0}")]
    AnalysisUnavailable(String),

    /// The conversation store failed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error("Conversation {0} is closed")]
    ConversationClosed(ConversationId),

    #[error("Insight not found: {0}")]
    InsightNotFound(InsightId),

    #[error("Conversation {0} already has an insight")]
    InsightExists(ConversationId),

    /// The review was empty or asked for a forbidden status change.
    #[error("Invalid review: {0}")]
    InvalidReview(String),

    #[error("Domain error: {0}")]
    Domain(DomainError),
}

impl TriageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TriageError::AnalysisUnavailable(_) => ErrorCode::AnalysisUnavailable,
            TriageError::StorageUnavailable(_) => ErrorCode::StorageUnavailable,
            TriageError::ConversationNotFound(_) => ErrorCode::ConversationNotFound,
            TriageError::ConversationClosed(_) => ErrorCode::ConversationClosed,
            TriageError::InsightNotFound(_) => ErrorCode::InsightNotFound,
            TriageError::InsightExists(_) => ErrorCode::InsightAlreadyExists,
            TriageError::InvalidReview(_) => ErrorCode::InvalidStateTransition,
            TriageError::Domain(err) => err.code,
        }
    }
}

impl From<AnalysisError> for TriageError {
    fn from(err: AnalysisError) -> Self {
        TriageError::AnalysisUnavailable(err.to_string())
    }
}

impl From<StoreError> for TriageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConversationNotFound(id) => TriageError::ConversationNotFound(id),
            StoreError::ConversationClosed(id) => TriageError::ConversationClosed(id),
            StoreError::InsightNotFound(id) => TriageError::InsightNotFound(id),
            StoreError::InsightExists(id) => TriageError::InsightExists(id),
            StoreError::InvalidUpdate(reason) => TriageError::InvalidReview(reason),
            StoreError::Unavailable(reason) => TriageError::StorageUnavailable(reason),
            StoreError::AlreadyExists(_) => TriageError::StorageUnavailable(err.to_string()),
        }
    }
}

impl From<DomainError> for TriageError {
    fn from(err: DomainError) -> Self {
        TriageError::Domain(err)
    }
}
