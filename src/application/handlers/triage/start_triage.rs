//! StartTriageHandler - Score a comment and open a follow-up if warranted.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::TriageError;
use crate::domain::foundation::ConversationId;
use crate::domain::triage::{Conversation, ConversationAgent, StartContext, StartDecision};
use crate::ports::{ConversationStore, FeedbackAnalyzer};

/// Command to triage one feedback comment.
#[derive(Debug, Clone)]
pub struct StartTriageCommand {
    pub text: String,
    pub context: StartContext,
}

impl StartTriageCommand {
    pub fn new(text: impl Into<String>, context: StartContext) -> Self {
        Self {
            text: text.into(),
            context,
        }
    }
}

/// Result of triaging a comment.
#[derive(Debug, Clone)]
pub struct StartTriageResult {
    pub decision: StartDecision,
    /// Present iff a follow-up conversation was opened.
    pub conversation_id: Option<ConversationId>,
}

/// Handler for the start flow.
///
/// Analysis failure aborts the flow. The conversation is persisted with a
/// single `create`, so a failed start leaves nothing behind.
pub struct StartTriageHandler {
    analyzer: Arc<dyn FeedbackAnalyzer>,
    store: Arc<dyn ConversationStore>,
    agent: Arc<ConversationAgent>,
}

impl StartTriageHandler {
    pub fn new(
        analyzer: Arc<dyn FeedbackAnalyzer>,
        store: Arc<dyn ConversationStore>,
        agent: Arc<ConversationAgent>,
    ) -> Self {
        Self {
            analyzer,
            store,
            agent,
        }
    }

    pub async fn handle(&self, cmd: StartTriageCommand) -> Result<StartTriageResult, TriageError> {
        let analysis = self.analyzer.analyze(&cmd.text).await.map_err(|err| {
            warn!(error = %err, "Feedback analysis failed");
            TriageError::from(err)
        })?;

        let decision = self.agent.start(&cmd.text, &analysis, &cmd.context);
        if !decision.requires_follow_up {
            debug!(
                stress = %analysis.stress_level(),
                category = %decision.primary_category,
                "No follow-up required"
            );
            return Ok(StartTriageResult {
                decision,
                conversation_id: None,
            });
        }

        let conversation = Conversation::open(&cmd.text, &decision, &cmd.context)?;
        let conversation_id = self.store.create(&conversation).await.map_err(|err| {
            warn!(error = %err, "Failed to persist new conversation");
            TriageError::from(err)
        })?;

        info!(
            conversation_id = %conversation_id,
            risk = %decision.risk,
            category = %decision.primary_category,
            department = %cmd.context.department,
            "Follow-up conversation opened"
        );

        Ok(StartTriageResult {
            decision,
            conversation_id: Some(conversation_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryConversationStore, MockFeedbackAnalyzer};
    use crate::application::handlers::test_support::FailingStore;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::triage::{RiskLevel, TriagePhase, TriageRules};
    use crate::ports::AnalysisError;

    fn agent() -> Arc<ConversationAgent> {
        Arc::new(ConversationAgent::with_keyword_detector(TriageRules::default()).unwrap())
    }

    fn handler(
        analyzer: MockFeedbackAnalyzer,
        store: Arc<dyn ConversationStore>,
    ) -> StartTriageHandler {
        StartTriageHandler::new(Arc::new(analyzer), store, agent())
    }

    #[tokio::test]
    async fn stressed_comment_opens_conversation() {
        let store = Arc::new(InMemoryConversationStore::new());
        let handler = handler(MockFeedbackAnalyzer::new(), store.clone());

        let result = handler
            .handle(StartTriageCommand::new(
                "Me siento muy estresado con la carga de trabajo actual",
                StartContext::new("Ventas", "Norte"),
            ))
            .await
            .unwrap();

        assert!(result.decision.requires_follow_up);
        assert_eq!(result.decision.risk, RiskLevel::High);
        let id = result.conversation_id.unwrap();

        let stored = store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.phase(), TriagePhase::Probing);
        assert_eq!(stored.messages().len(), 2);
        assert_eq!(stored.department(), "Ventas");
        assert_eq!(
            stored.messages()[1].content(),
            result.decision.question.as_deref().unwrap()
        );
    }

    #[tokio::test]
    async fn positive_comment_opens_nothing() {
        let store = Arc::new(InMemoryConversationStore::new());
        let handler = handler(MockFeedbackAnalyzer::new(), store.clone());

        let result = handler
            .handle(StartTriageCommand::new(
                "Me gusta mucho el ambiente de trabajo en mi equipo",
                StartContext::default(),
            ))
            .await
            .unwrap();

        assert!(!result.decision.requires_follow_up);
        assert!(result.conversation_id.is_none());
        assert_eq!(store.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn analysis_failure_is_surfaced() {
        let store = Arc::new(InMemoryConversationStore::new());
        let analyzer =
            MockFeedbackAnalyzer::new().with_error(AnalysisError::Unavailable("timeout".into()));
        let handler = handler(analyzer, store.clone());

        let err = handler
            .handle(StartTriageCommand::new("Estoy agotado", StartContext::default()))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AnalysisUnavailable);
        assert_eq!(store.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn storage_failure_is_surfaced() {
        let handler = handler(MockFeedbackAnalyzer::new(), Arc::new(FailingStore));

        let err = handler
            .handle(StartTriageCommand::new("Estoy agotado", StartContext::default()))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::StorageUnavailable);
    }
}
