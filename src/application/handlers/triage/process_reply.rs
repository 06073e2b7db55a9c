//! ProcessReplyHandler - Advance a conversation by one employee reply.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::TriageError;
use crate::domain::foundation::{ConversationId, DomainError};
use crate::domain::insight::{Insight, InsightGenerator};
use crate::domain::triage::{Action, ConversationAgent, Message, TurnDecision};
use crate::ports::ConversationStore;

/// Command carrying one employee reply.
#[derive(Debug, Clone)]
pub struct ProcessReplyCommand {
    pub conversation_id: ConversationId,
    pub reply: String,
}

impl ProcessReplyCommand {
    pub fn new(conversation_id: ConversationId, reply: impl Into<String>) -> Self {
        Self {
            conversation_id,
            reply: reply.into(),
        }
    }
}

/// Result of processing a reply.
#[derive(Debug, Clone)]
pub struct ProcessReplyResult {
    pub decision: TurnDecision,
    /// Insight produced when the conversation closed, if any.
    pub insight: Option<Insight>,
}

/// Handler for the advance flow.
///
/// Writes happen in order: reply, blocker, risk, then either the next
/// question or insight + close. The insight is saved before the close so a
/// closed conversation always has its summary in place.
///
/// A reply resent after a turn failed part-way is replayed: writes that
/// already landed (the reply, its blocker, the insight) are not repeated.
pub struct ProcessReplyHandler {
    store: Arc<dyn ConversationStore>,
    agent: Arc<ConversationAgent>,
    generator: Arc<InsightGenerator>,
}

impl ProcessReplyHandler {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        agent: Arc<ConversationAgent>,
        generator: Arc<InsightGenerator>,
    ) -> Self {
        Self {
            store,
            agent,
            generator,
        }
    }

    pub async fn handle(&self, cmd: ProcessReplyCommand) -> Result<ProcessReplyResult, TriageError> {
        let id = cmd.conversation_id;
        let conversation = self
            .store
            .get(&id)
            .await?
            .ok_or(TriageError::ConversationNotFound(id))?;
        if !conversation.is_active() {
            return Err(TriageError::ConversationClosed(id));
        }

        let messages = conversation.messages();
        let replay = is_replay(messages, &cmd.reply);
        let previous = if replay {
            &messages[..messages.len() - 1]
        } else {
            messages
        };

        let mut context = conversation.turn_context();
        let blocker_recorded = replay && {
            let detected = self.agent.detector().detect(&cmd.reply, previous);
            detected.is_some() && context.previous_blockers.last() == detected.as_ref()
        };
        if blocker_recorded {
            context.previous_blockers.pop();
        }
        if replay {
            debug!(conversation_id = %id, "Replaying reply from an incomplete turn");
        }

        let decision = self.agent.advance(&cmd.reply, &context, previous);

        // Blank replies are not worth keeping in the transcript.
        if !replay {
            if let Ok(message) = Message::employee(cmd.reply.as_str()) {
                self.store.append_message(&id, &message).await?;
            }
        }
        if let Some(blocker) = decision.blocker.as_ref().filter(|_| !blocker_recorded) {
            self.store.append_blocker(&id, blocker).await?;
            debug!(
                conversation_id = %id,
                blocker_type = %blocker.blocker_type,
                severity = %blocker.severity,
                "Blocker detected"
            );
        }
        if decision.risk > conversation.current_risk() {
            self.store.update_risk(&id, decision.risk).await?;
            info!(
                conversation_id = %id,
                from = %conversation.current_risk(),
                to = %decision.risk,
                "Risk escalated"
            );
        }

        let insight = match decision.action {
            Action::Probe => {
                if let Some(question) = &decision.question {
                    let message = Message::agent(question.as_str()).map_err(DomainError::from)?;
                    self.store.append_message(&id, &message).await?;
                }
                None
            }
            Action::Close => self.close(&id, &decision).await?,
        };

        Ok(ProcessReplyResult { decision, insight })
    }

    async fn close(
        &self,
        id: &ConversationId,
        decision: &TurnDecision,
    ) -> Result<Option<Insight>, TriageError> {
        let conversation = self
            .store
            .get(id)
            .await?
            .ok_or(TriageError::ConversationNotFound(*id))?;

        if let Some(existing) = self.store.insight_for_conversation(id).await? {
            debug!(conversation_id = %id, insight_id = %existing.id(), "Insight already saved");
            self.store.close(id).await?;
            info!(conversation_id = %id, reason = ?decision.close_reason, "Conversation closed");
            return Ok(Some(existing));
        }

        let insight = self.generator.generate(
            &conversation,
            conversation.initial_analysis(),
            conversation.messages(),
            conversation.blockers(),
        );

        match &insight {
            Some(insight) => {
                self.store.save_insight(insight).await.map_err(|err| {
                    warn!(conversation_id = %id, error = %err, "Failed to save insight");
                    TriageError::from(err)
                })?;
                info!(
                    conversation_id = %id,
                    insight_id = %insight.id(),
                    insight_type = %insight.insight_type(),
                    severity = %insight.severity(),
                    "Insight generated"
                );
            }
            None => debug!(conversation_id = %id, "No insight for conversation"),
        }

        self.store.close(id).await?;
        info!(
            conversation_id = %id,
            reason = ?decision.close_reason,
            risk = %decision.risk,
            "Conversation closed"
        );
        Ok(insight)
    }
}

/// True when the transcript already ends with this employee reply, which
/// only happens when an earlier attempt at the turn failed after appending
/// it.
fn is_replay(messages: &[Message], reply: &str) -> bool {
    messages
        .last()
        .is_some_and(|last| last.is_employee() && last.content() == reply)
}
