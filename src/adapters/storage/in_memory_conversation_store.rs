//! In-Memory Conversation Store Adapter
//!
//! Stores conversations and insights in memory.
//! Used by the demo binary and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, InsightId};
use crate::domain::insight::{Insight, InsightFilter, InsightReview};
use crate::domain::triage::{BlockerRecord, Conversation, Message, RiskLevel};
use crate::ports::{ConversationStore, StoreError};

/// In-memory storage for conversations and insights.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
    insights: Arc<RwLock<HashMap<InsightId, Insight>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored conversations
    pub async fn conversation_count(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Get the number of stored insights
    pub async fn insight_count(&self) -> usize {
        self.insights.read().await.len()
    }

    /// Runs a mutation against a stored conversation.
    async fn mutate<F>(&self, id: &ConversationId, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Conversation) -> Result<(), DomainError> + Send,
    {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(id)
            .ok_or(StoreError::ConversationNotFound(*id))?;
        f(conversation).map_err(|err| match err.code {
            ErrorCode::ConversationClosed | ErrorCode::InvalidStateTransition => {
                StoreError::ConversationClosed(*id)
            }
            _ => StoreError::InvalidUpdate(err.to_string()),
        })
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create(&self, conversation: &Conversation) -> Result<ConversationId, StoreError> {
        let mut conversations = self.conversations.write().await;
        let id = *conversation.id();
        if conversations.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }
        conversations.insert(id, conversation.clone());
        Ok(id)
    }

    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn append_message(
        &self,
        id: &ConversationId,
        message: &Message,
    ) -> Result<(), StoreError> {
        let message = message.clone();
        self.mutate(id, move |c| c.append_message(message)).await
    }

    async fn append_blocker(
        &self,
        id: &ConversationId,
        blocker: &BlockerRecord,
    ) -> Result<(), StoreError> {
        let blocker = blocker.clone();
        self.mutate(id, move |c| c.record_blocker(blocker)).await
    }

    async fn update_risk(&self, id: &ConversationId, level: RiskLevel) -> Result<(), StoreError> {
        self.mutate(id, move |c| c.raise_risk(level).map(|_| ())).await
    }

    async fn close(&self, id: &ConversationId) -> Result<(), StoreError> {
        self.mutate(id, |c| c.close()).await
    }

    async fn save_insight(&self, insight: &Insight) -> Result<InsightId, StoreError> {
        let mut insights = self.insights.write().await;
        let conversation_id = *insight.conversation_id();
        if insights
            .values()
            .any(|existing| existing.conversation_id() == &conversation_id)
        {
            return Err(StoreError::InsightExists(conversation_id));
        }
        let id = *insight.id();
        insights.insert(id, insight.clone());
        Ok(id)
    }

    async fn get_insight(&self, id: &InsightId) -> Result<Option<Insight>, StoreError> {
        Ok(self.insights.read().await.get(id).cloned())
    }

    async fn insight_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Insight>, StoreError> {
        Ok(self
            .insights
            .read()
            .await
            .values()
            .find(|insight| insight.conversation_id() == conversation_id)
            .cloned())
    }

    async fn list_insights(&self, filter: &InsightFilter) -> Result<Vec<Insight>, StoreError> {
        let insights = self.insights.read().await;
        Ok(filter.apply(insights.values().cloned()))
    }

    async fn update_insight(
        &self,
        id: &InsightId,
        review: &InsightReview,
    ) -> Result<Insight, StoreError> {
        let mut insights = self.insights.write().await;
        let insight = insights
            .get_mut(id)
            .ok_or(StoreError::InsightNotFound(*id))?;

        // Apply to a copy so a rejected review leaves the stored insight intact.
        let mut updated = insight.clone();
        updated
            .apply_review(review.clone())
            .map_err(|e| StoreError::InvalidUpdate(e.to_string()))?;
        *insight = updated.clone();
        Ok(updated)
    }
}
