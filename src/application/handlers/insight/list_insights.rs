//! ListInsightsHandler - Query insights and their statistics.

use std::sync::Arc;

use tracing::debug;

use crate::application::TriageError;
use crate::domain::foundation::InsightId;
use crate::domain::insight::{Insight, InsightFilter, InsightStats};
use crate::ports::ConversationStore;

/// Query handler for HR insight listings.
pub struct ListInsightsHandler {
    store: Arc<dyn ConversationStore>,
}

impl ListInsightsHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Insights matching the filter, newest first.
    pub async fn handle(&self, filter: &InsightFilter) -> Result<Vec<Insight>, TriageError> {
        let insights = self.store.list_insights(filter).await?;
        debug!(count = insights.len(), "Listed insights");
        Ok(insights)
    }

    /// Counts over the insights matching the filter.
    pub async fn stats(&self, filter: &InsightFilter) -> Result<InsightStats, TriageError> {
        let insights = self.store.list_insights(filter).await?;
        Ok(InsightStats::from_insights(&insights))
    }

    pub async fn get(&self, id: &InsightId) -> Result<Insight, TriageError> {
        self.store
            .get_insight(id)
            .await?
            .ok_or(TriageError::InsightNotFound(*id))
    }
}
