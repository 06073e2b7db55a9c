//! ReviewInsightHandler - Apply an HR review to an insight.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::TriageError;
use crate::domain::foundation::InsightId;
use crate::domain::insight::{Insight, InsightReview};
use crate::ports::ConversationStore;

/// Command to review an insight.
#[derive(Debug, Clone)]
pub struct ReviewInsightCommand {
    pub insight_id: InsightId,
    pub review: InsightReview,
}

/// Handler for HR reviews.
///
/// Only workflow fields can change; the status must follow the insight
/// workflow.
pub struct ReviewInsightHandler {
    store: Arc<dyn ConversationStore>,
}

impl ReviewInsightHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ReviewInsightCommand) -> Result<Insight, TriageError> {
        if cmd.review.is_empty() {
            return Err(TriageError::InvalidReview(
                "Review carries no changes".to_string(),
            ));
        }

        let insight = self
            .store
            .update_insight(&cmd.insight_id, &cmd.review)
            .await
            .map_err(|err| {
                warn!(insight_id = %cmd.insight_id, error = %err, "Insight review rejected");
                TriageError::from(err)
            })?;

        info!(
            insight_id = %cmd.insight_id,
            status = %insight.status(),
            reviewer = insight.reviewed_by().unwrap_or(""),
            "Insight reviewed"
        );
        Ok(insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryConversationStore;
    use crate::domain::foundation::{ConversationId, ErrorCode};
    use crate::domain::insight::{InsightDraft, InsightSeverity, InsightStatus, InsightType};

    async fn seeded() -> (ReviewInsightHandler, InsightId) {
        let store = Arc::new(InMemoryConversationStore::new());
        let insight = Insight::new(InsightDraft {
            insight_type: InsightType::FailedAction,
            category: "liderazgo".to_string(),
            title: "Intentos de contacto con el liderazgo sin respuesta".to_string(),
            severity: InsightSeverity::Medium,
            description: String::new(),
            full_context: String::new(),
            evidence: vec!["he intentado hablar".to_string()],
            recommendation: "Mediar".to_string(),
            department: "Ventas".to_string(),
            team: String::new(),
            conversation_id: ConversationId::new(),
        });
        let id = store.save_insight(&insight).await.unwrap();
        (ReviewInsightHandler::new(store), id)
    }

    fn review(status: InsightStatus) -> InsightReview {
        InsightReview {
            status: Some(status),
            hr_notes: Some("Reunión agendada".to_string()),
            reviewed_by: Some("rrhh@empresa".to_string()),
        }
    }

    #[tokio::test]
    async fn review_moves_status_and_stamps_date() {
        let (handler, id) = seeded().await;

        let insight = handler
            .handle(ReviewInsightCommand {
                insight_id: id,
                review: review(InsightStatus::Reviewed),
            })
            .await
            .unwrap();

        assert_eq!(insight.status(), InsightStatus::Reviewed);
        assert_eq!(insight.hr_notes(), Some("Reunión agendada"));
        assert!(insight.reviewed_at().is_some());
    }

    #[tokio::test]
    async fn forbidden_transition_is_rejected() {
        let (handler, id) = seeded().await;
        handler
            .handle(ReviewInsightCommand {
                insight_id: id,
                review: review(InsightStatus::Resolved),
            })
            .await
            .unwrap();

        let err = handler
            .handle(ReviewInsightCommand {
                insight_id: id,
                review: review(InsightStatus::Reviewed),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TriageError::InvalidReview(_)));
    }

    #[tokio::test]
    async fn empty_review_is_rejected() {
        let (handler, id) = seeded().await;
        let err = handler
            .handle(ReviewInsightCommand {
                insight_id: id,
                review: InsightReview::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TriageError::InvalidReview(_)));
    }

    #[tokio::test]
    async fn unknown_insight_is_not_found() {
        let (handler, _) = seeded().await;
        let err = handler
            .handle(ReviewInsightCommand {
                insight_id: InsightId::new(),
                review: review(InsightStatus::Reviewed),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsightNotFound);
    }
}
