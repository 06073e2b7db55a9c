//! BatchTriageHandler - Run the start flow for many comments at once.

use std::sync::Arc;

use futures::future::join_all;
use tracing::info;

use super::start_triage::{StartTriageCommand, StartTriageHandler, StartTriageResult};
use crate::application::TriageError;

/// Outcome of a batch: one result per comment, in input order.
#[derive(Debug)]
pub struct BatchTriageResult {
    pub results: Vec<Result<StartTriageResult, TriageError>>,
}

impl BatchTriageResult {
    /// Number of comments that opened a conversation.
    pub fn follow_up_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, Ok(result) if result.conversation_id.is_some()))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_err()).count()
    }
}

/// Handler for batch triage.
///
/// Comments are independent: each one gets its own conversation and one
/// failing comment does not affect the others.
pub struct BatchTriageHandler {
    start: Arc<StartTriageHandler>,
}

impl BatchTriageHandler {
    pub fn new(start: Arc<StartTriageHandler>) -> Self {
        Self { start }
    }

    pub async fn handle(&self, commands: Vec<StartTriageCommand>) -> BatchTriageResult {
        let total = commands.len();
        let results = join_all(commands.into_iter().map(|cmd| self.start.handle(cmd))).await;
        let batch = BatchTriageResult { results };

        info!(
            total,
            follow_ups = batch.follow_up_count(),
            failures = batch.failure_count(),
            "Batch triage completed"
        );
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryConversationStore, MockFeedbackAnalyzer};
    use crate::domain::triage::{ConversationAgent, StartContext, TriageRules};
    use crate::ports::AnalysisError;

    fn batch_handler(analyzer: MockFeedbackAnalyzer) -> (BatchTriageHandler, Arc<InMemoryConversationStore>) {
        let store = Arc::new(InMemoryConversationStore::new());
        let agent =
            Arc::new(ConversationAgent::with_keyword_detector(TriageRules::default()).unwrap());
        let start = Arc::new(StartTriageHandler::new(Arc::new(analyzer), store.clone(), agent));
        (BatchTriageHandler::new(start), store)
    }

    fn commands(texts: &[&str]) -> Vec<StartTriageCommand> {
        texts
            .iter()
            .map(|t| StartTriageCommand::new(*t, StartContext::new("Operaciones", "")))
            .collect()
    }

    #[tokio::test]
    async fn results_follow_input_order() {
        let (handler, store) = batch_handler(MockFeedbackAnalyzer::new());

        let batch = handler
            .handle(commands(&[
                "Me gusta mucho el ambiente de trabajo en mi equipo",
                "Estoy agotado y con mucha presión",
                "",
            ]))
            .await;

        assert_eq!(batch.results.len(), 3);
        let first = batch.results[0].as_ref().unwrap();
        let second = batch.results[1].as_ref().unwrap();
        let third = batch.results[2].as_ref().unwrap();
        assert!(first.conversation_id.is_none());
        assert!(second.conversation_id.is_some());
        assert!(third.conversation_id.is_none());
        assert_eq!(batch.follow_up_count(), 1);
        assert_eq!(store.conversation_count().await, 1);
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let analyzer =
            MockFeedbackAnalyzer::new().with_error(AnalysisError::Failed("bad input".into()));
        let (handler, _store) = batch_handler(analyzer);

        let batch = handler
            .handle(commands(&["Estoy agotado", "Estoy agotada"]))
            .await;

        assert_eq!(batch.failure_count(), 1);
        assert_eq!(batch.follow_up_count(), 1);
    }

    #[tokio::test]
    async fn empty_batch_is_fine() {
        let (handler, _store) = batch_handler(MockFeedbackAnalyzer::new());
        let batch = handler.handle(Vec::new()).await;
        assert!(batch.results.is_empty());
    }
}
