//! Shared doubles for handler tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::InMemoryConversationStore;
use crate::domain::foundation::{ConversationId, InsightId};
use crate::domain::insight::{Insight, InsightFilter, InsightReview};
use crate::domain::triage::{BlockerRecord, Conversation, Message, RiskLevel};
use crate::ports::{ConversationStore, StoreError};

/// Store whose backend is always down.
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("backend offline".to_string())
}

#[async_trait]
impl ConversationStore for FailingStore {
    async fn create(&self, _conversation: &Conversation) -> Result<ConversationId, StoreError> {
        Err(down())
    }

    async fn get(&self, _id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        Err(down())
    }

    async fn append_message(
        &self,
        _id: &ConversationId,
        _message: &Message,
    ) -> Result<(), StoreError> {
        Err(down())
    }

    async fn append_blocker(
        &self,
        _id: &ConversationId,
        _blocker: &BlockerRecord,
    ) -> Result<(), StoreError> {
        Err(down())
    }

    async fn update_risk(&self, _id: &ConversationId, _level: RiskLevel) -> Result<(), StoreError> {
        Err(down())
    }

    async fn close(&self, _id: &ConversationId) -> Result<(), StoreError> {
        Err(down())
    }

    async fn save_insight(&self, _insight: &Insight) -> Result<InsightId, StoreError> {
        Err(down())
    }

    async fn get_insight(&self, _id: &InsightId) -> Result<Option<Insight>, StoreError> {
        Err(down())
    }

    async fn insight_for_conversation(
        &self,
        _conversation_id: &ConversationId,
    ) -> Result<Option<Insight>, StoreError> {
        Err(down())
    }

    async fn list_insights(&self, _filter: &InsightFilter) -> Result<Vec<Insight>, StoreError> {
        Err(down())
    }

    async fn update_insight(
        &self,
        _id: &InsightId,
        _review: &InsightReview,
    ) -> Result<Insight, StoreError> {
        Err(down())
    }
}

/// In-memory store whose first `close` fails; everything else delegates.
pub struct CloseFailsOnce {
    inner: Arc<InMemoryConversationStore>,
    failed: AtomicBool,
}

impl CloseFailsOnce {
    pub fn new(inner: Arc<InMemoryConversationStore>) -> Self {
        Self {
            inner,
            failed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ConversationStore for CloseFailsOnce {
    async fn create(&self, conversation: &Conversation) -> Result<ConversationId, StoreError> {
        self.inner.create(conversation).await
    }

    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        self.inner.get(id).await
    }

    async fn append_message(
        &self,
        id: &ConversationId,
        message: &Message,
    ) -> Result<(), StoreError> {
        self.inner.append_message(id, message).await
    }

    async fn append_blocker(
        &self,
        id: &ConversationId,
        blocker: &BlockerRecord,
    ) -> Result<(), StoreError> {
        self.inner.append_blocker(id, blocker).await
    }

    async fn update_risk(&self, id: &ConversationId, level: RiskLevel) -> Result<(), StoreError> {
        self.inner.update_risk(id, level).await
    }

    async fn close(&self, id: &ConversationId) -> Result<(), StoreError> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            return Err(down());
        }
        self.inner.close(id).await
    }

    async fn save_insight(&self, insight: &Insight) -> Result<InsightId, StoreError> {
        self.inner.save_insight(insight).await
    }

    async fn get_insight(&self, id: &InsightId) -> Result<Option<Insight>, StoreError> {
        self.inner.get_insight(id).await
    }

    async fn insight_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Insight>, StoreError> {
        self.inner.insight_for_conversation(conversation_id).await
    }

    async fn list_insights(&self, filter: &InsightFilter) -> Result<Vec<Insight>, StoreError> {
        self.inner.list_insights(filter).await
    }

    async fn update_insight(
        &self,
        id: &InsightId,
        review: &InsightReview,
    ) -> Result<Insight, StoreError> {
        self.inner.update_insight(id, review).await
    }
}
