//! Follow-up conversation entity.
//!
//! A conversation exists only for comments whose risk warranted follow-up.
//! It is created complete (opening comment plus first question) and then
//! only grows: messages and blockers are append-only, risk only rises, and
//! once closed nothing changes.

use serde::{Deserialize, Serialize};

use super::blocker::BlockerRecord;
use super::decision::{StartContext, StartDecision, TurnContext};
use super::message::{count_employee_replies, render_transcript, Message};
use super::risk::RiskLevel;
use super::state::{ConversationStatus, TriagePhase};
use crate::domain::feedback::InitialAnalysis;
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, StateMachine, Timestamp,
};

/// Stateful record of one follow-up dialogue.
///
/// # Invariants
///
/// - `messages` starts with the employee comment followed by an agent question
/// - `current_risk` never decreases
/// - a closed conversation rejects every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,

    #[serde(rename = "estado")]
    status: ConversationStatus,

    #[serde(rename = "nivel_riesgo_actual")]
    current_risk: RiskLevel,

    /// Top category of the opening comment; never changes.
    #[serde(rename = "categoria_principal")]
    primary_category: String,

    #[serde(rename = "departamento")]
    department: String,

    #[serde(rename = "equipo")]
    team: String,

    #[serde(rename = "mensajes")]
    messages: Vec<Message>,

    #[serde(rename = "blockers_detectados")]
    blockers: Vec<BlockerRecord>,

    #[serde(rename = "analisis_inicial")]
    initial_analysis: InitialAnalysis,

    created_at: Timestamp,

    updated_at: Timestamp,
}

impl Conversation {
    /// Opens a conversation from a start decision that requires follow-up.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the decision does not require follow-up or
    ///   carries no question
    /// - `EmptyField` if the opening comment is blank
    pub fn open(
        initial_text: &str,
        decision: &StartDecision,
        context: &StartContext,
    ) -> Result<Self, DomainError> {
        if !decision.requires_follow_up {
            return Err(DomainError::validation(
                "requiere_seguimiento",
                "Cannot open a conversation for a comment without follow-up",
            ));
        }
        let question = decision.question.as_deref().ok_or_else(|| {
            DomainError::validation("pregunta_agente", "Follow-up requires an opening question")
        })?;

        let messages = vec![Message::employee(initial_text)?, Message::agent(question)?];

        let now = Timestamp::now();
        Ok(Self {
            id: ConversationId::new(),
            status: ConversationStatus::Active,
            current_risk: decision.risk,
            primary_category: decision.primary_category.clone(),
            department: context.department.clone(),
            team: context.team.clone(),
            messages,
            blockers: Vec::new(),
            initial_analysis: decision.analysis.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn phase(&self) -> TriagePhase {
        TriagePhase::from(self.status)
    }

    pub fn current_risk(&self) -> RiskLevel {
        self.current_risk
    }

    pub fn primary_category(&self) -> &str {
        &self.primary_category
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn blockers(&self) -> &[BlockerRecord] {
        &self.blockers
    }

    pub fn initial_analysis(&self) -> &InitialAnalysis {
        &self.initial_analysis
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Number of employee replies after the opening comment.
    pub fn employee_reply_count(&self) -> usize {
        count_employee_replies(&self.messages)
    }

    /// Transcript as `rol: contenido` lines.
    pub fn transcript(&self) -> String {
        render_transcript(&self.messages)
    }

    /// Snapshot handed to the agent for the next turn.
    pub fn turn_context(&self) -> TurnContext {
        TurnContext {
            conversation_id: Some(self.id),
            risk: self.current_risk,
            primary_category: self.primary_category.clone(),
            department: self.department.clone(),
            team: self.team.clone(),
            previous_blockers: self.blockers.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a transcript message.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation is closed
    pub fn append_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.messages.push(message);
        self.touch();
        Ok(())
    }

    /// Records a detected blocker.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation is closed
    pub fn record_blocker(&mut self, blocker: BlockerRecord) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.blockers.push(blocker);
        self.touch();
        Ok(())
    }

    /// Raises the risk to at least `level`. Returns true if it changed.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation is closed
    pub fn raise_risk(&mut self, level: RiskLevel) -> Result<bool, DomainError> {
        self.ensure_active()?;
        let raised = self.current_risk.escalate_to(level);
        if raised == self.current_risk {
            return Ok(false);
        }
        self.current_risk = raised;
        self.touch();
        Ok(true)
    }

    /// Closes the conversation.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already closed
    pub fn close(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(ConversationStatus::Closed)?;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::ConversationClosed,
                "Cannot modify a closed conversation",
            )
            .with_detail("conversation_id", self.id.to_string()))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::{
        CategoryScore, EmotionScore, SentimentDistribution, StressAssessment, StressLevel,
    };
    use crate::domain::triage::blocker::{BlockerSeverity, BlockerType};

    fn analysis() -> InitialAnalysis {
        InitialAnalysis {
            emotion: EmotionScore::new("tristeza", 0.8),
            stress: StressAssessment::new(
                StressLevel::High,
                SentimentDistribution::new(0.1, 0.2, 0.7),
            ),
            categories: vec![CategoryScore::new("sobrecarga laboral", 0.9)],
            summary: "Estrés por carga de trabajo".to_string(),
            suggestion: String::new(),
        }
    }

    fn decision() -> StartDecision {
        StartDecision {
            requires_follow_up: true,
            risk: RiskLevel::High,
            reason: "Nivel de estrés alto".to_string(),
            question: Some("¿Ya intentaste hablar con tu supervisor?".to_string()),
            primary_category: "sobrecarga laboral".to_string(),
            analysis: analysis(),
        }
    }

    fn open() -> Conversation {
        Conversation::open(
            "Me siento muy estresado",
            &decision(),
            &StartContext::new("Ventas", "Norte"),
        )
        .unwrap()
    }

    fn blocker() -> BlockerRecord {
        BlockerRecord::new(BlockerType::Leadership, BlockerSeverity::High, "nunca responde")
    }

    mod open {
        use super::*;

        #[test]
        fn starts_with_comment_and_question() {
            let conversation = open();
            assert!(conversation.is_active());
            assert_eq!(conversation.phase(), TriagePhase::Probing);
            assert_eq!(conversation.messages().len(), 2);
            assert!(conversation.messages()[0].is_employee());
            assert!(conversation.messages()[1].is_agent());
            assert_eq!(conversation.employee_reply_count(), 0);
            assert_eq!(conversation.current_risk(), RiskLevel::High);
            assert_eq!(conversation.department(), "Ventas");
            assert_eq!(conversation.team(), "Norte");
        }

        #[test]
        fn rejects_decision_without_follow_up() {
            let decision = StartDecision {
                requires_follow_up: false,
                question: None,
                ..decision()
            };
            let result = Conversation::open("Todo bien", &decision, &StartContext::default());
            assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
        }

        #[test]
        fn rejects_missing_question() {
            let decision = StartDecision {
                question: None,
                ..decision()
            };
            let result = Conversation::open("Estresado", &decision, &StartContext::default());
            assert!(result.is_err());
        }

        #[test]
        fn rejects_blank_comment() {
            let result = Conversation::open("  ", &decision(), &StartContext::default());
            assert_eq!(result.unwrap_err().code, ErrorCode::EmptyField);
        }
    }

    mod mutations {
        use super::*;

        #[test]
        fn replies_are_counted_after_opening() {
            let mut conversation = open();
            conversation
                .append_message(Message::employee("Sí, pero nunca responde").unwrap())
                .unwrap();
            assert_eq!(conversation.employee_reply_count(), 1);
        }

        #[test]
        fn risk_never_decreases() {
            let mut conversation = open();
            assert!(!conversation.raise_risk(RiskLevel::Low).unwrap());
            assert_eq!(conversation.current_risk(), RiskLevel::High);
            assert!(conversation.raise_risk(RiskLevel::Critical).unwrap());
            assert_eq!(conversation.current_risk(), RiskLevel::Critical);
        }

        #[test]
        fn turn_context_reflects_state() {
            let mut conversation = open();
            conversation.record_blocker(blocker()).unwrap();
            let context = conversation.turn_context();
            assert_eq!(context.conversation_id, Some(*conversation.id()));
            assert_eq!(context.previous_blockers, vec![blocker()]);
            assert_eq!(context.primary_category, "sobrecarga laboral");
        }

        #[test]
        fn closed_conversation_is_immutable() {
            let mut conversation = open();
            conversation.close().unwrap();
            assert_eq!(conversation.phase(), TriagePhase::Closed);

            let err = conversation
                .append_message(Message::employee("Hola").unwrap())
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ConversationClosed);
            assert!(conversation.record_blocker(blocker()).is_err());
            assert!(conversation.raise_risk(RiskLevel::Critical).is_err());
            assert_eq!(
                conversation.close().unwrap_err().code,
                ErrorCode::InvalidStateTransition
            );
        }
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let conversation = open();
        let value = serde_json::to_value(&conversation).unwrap();
        assert_eq!(value["estado"], "activa");
        assert_eq!(value["nivel_riesgo_actual"], "alto");
        assert_eq!(value["mensajes"][0]["rol"], "empleado");
        assert!(value["blockers_detectados"].as_array().unwrap().is_empty());

        let restored: Conversation = serde_json::from_value(value).unwrap();
        assert_eq!(restored, conversation);
    }
}
