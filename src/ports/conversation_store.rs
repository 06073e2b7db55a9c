//! Conversation store port.
//!
//! Persistence contract for conversations and the insights they produce.
//!
//! # Design
//!
//! - **Piecewise writes**: each turn appends a message, an optional blocker
//!   and a risk update, then either the next question or a close
//! - **Monotonic risk**: `update_risk` never lowers the stored level
//! - **Workflow-only updates**: insights change only through an
//!   `InsightReview`

use async_trait::async_trait;

use crate::domain::foundation::{ConversationId, InsightId};
use crate::domain::insight::{Insight, InsightFilter, InsightReview};
use crate::domain::triage::{BlockerRecord, Conversation, Message, RiskLevel};

/// Errors from the conversation store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error("Insight not found: {0}")]
    InsightNotFound(InsightId),

    #[error("Conversation {0} is closed")]
    ConversationClosed(ConversationId),

    #[error("Conversation {0} already exists")]
    AlreadyExists(ConversationId),

    #[error("Conversation {0} already has an insight")]
    InsightExists(ConversationId),

    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for conversation and insight persistence.
///
/// Writes for one conversation must be visible before its next turn is
/// processed. Callers serialize turns per conversation.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persist a new conversation in its opening state.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the id is taken
    async fn create(&self, conversation: &Conversation) -> Result<ConversationId, StoreError>;

    /// Load a conversation with all messages and blockers.
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError>;

    /// Append a transcript message.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    /// - `ConversationClosed` if it is closed
    async fn append_message(&self, id: &ConversationId, message: &Message)
        -> Result<(), StoreError>;

    /// Append a detected blocker.
    async fn append_blocker(
        &self,
        id: &ConversationId,
        blocker: &BlockerRecord,
    ) -> Result<(), StoreError>;

    /// Raise the stored risk to at least `level`. Never lowers it.
    async fn update_risk(&self, id: &ConversationId, level: RiskLevel) -> Result<(), StoreError>;

    /// Close the conversation. Afterwards it is read-only.
    async fn close(&self, id: &ConversationId) -> Result<(), StoreError>;

    /// Persist a new insight.
    ///
    /// # Errors
    ///
    /// - `InsightExists` if the insight's conversation already has one
    async fn save_insight(&self, insight: &Insight) -> Result<InsightId, StoreError>;

    async fn get_insight(&self, id: &InsightId) -> Result<Option<Insight>, StoreError>;

    /// The insight produced by a conversation, if any.
    async fn insight_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Insight>, StoreError>;

    /// List insights matching `filter`, newest first.
    async fn list_insights(&self, filter: &InsightFilter) -> Result<Vec<Insight>, StoreError>;

    /// Apply an HR review, returning the updated insight.
    ///
    /// # Errors
    ///
    /// - `InsightNotFound` if the insight doesn't exist
    /// - `InvalidUpdate` if the review is empty or the status change is not
    ///   allowed
    async fn update_insight(
        &self,
        id: &InsightId,
        review: &InsightReview,
    ) -> Result<Insight, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ConversationStore) {}
    }
}
