//! Inputs and outputs of the triage agent.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::blocker::{BlockerDetection, BlockerRecord};
use super::risk::RiskLevel;
use super::state::TriagePhase;
use crate::domain::feedback::InitialAnalysis;
use crate::domain::foundation::ConversationId;

/// Organizational context of the employee giving feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartContext {
    #[serde(rename = "departamento", default)]
    pub department: String,
    #[serde(rename = "equipo", default)]
    pub team: String,
}

impl StartContext {
    pub fn new(department: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            team: team.into(),
        }
    }
}

/// Outcome of scoring an opening comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartDecision {
    #[serde(rename = "requiere_seguimiento")]
    pub requires_follow_up: bool,
    #[serde(rename = "nivel_riesgo")]
    pub risk: RiskLevel,
    #[serde(rename = "razon_seguimiento")]
    pub reason: String,
    /// Present iff `requires_follow_up`.
    #[serde(rename = "pregunta_agente", skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(rename = "categoria_principal")]
    pub primary_category: String,
    #[serde(rename = "analisis_nlp")]
    pub analysis: InitialAnalysis,
}

impl StartDecision {
    /// Phase the dialogue moves to, or `None` when it ends without a
    /// conversation.
    pub fn next_phase(&self) -> Option<TriagePhase> {
        self.requires_follow_up.then_some(TriagePhase::Probing)
    }
}

/// Snapshot of a conversation handed to the agent for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnContext {
    #[serde(rename = "conversacion_id", skip_serializing_if = "Option::is_none", default)]
    pub conversation_id: Option<ConversationId>,
    #[serde(rename = "nivel_riesgo")]
    pub risk: RiskLevel,
    #[serde(rename = "categoria_principal", default)]
    pub primary_category: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    #[serde(rename = "equipo", default)]
    pub team: String,
    #[serde(rename = "bloqueos_previos", default)]
    pub previous_blockers: Vec<BlockerRecord>,
}

/// Next move of the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "profundizar")]
    Probe,
    #[serde(rename = "cerrar")]
    Close,
}

/// Why a conversation was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseReason {
    /// The employee asked to stop.
    #[serde(rename = "rechazo")]
    Declined,
    /// Empty or malformed reply.
    #[serde(rename = "respuesta_invalida")]
    InvalidReply,
    #[serde(rename = "limite_turnos")]
    MaxTurns,
    /// Nothing new learned on this turn.
    #[serde(rename = "sin_informacion_nueva")]
    DiminishingReturns,
    #[serde(rename = "preguntas_agotadas")]
    QuestionsExhausted,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Declined => "rechazo",
            CloseReason::InvalidReply => "respuesta_invalida",
            CloseReason::MaxTurns => "limite_turnos",
            CloseReason::DiminishingReturns => "sin_informacion_nueva",
            CloseReason::QuestionsExhausted => "preguntas_agotadas",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one employee reply.
///
/// # Invariants
///
/// - `question` is present iff `action == Probe`
/// - `close_reason` is present iff `action == Close`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnDecision {
    #[serde(rename = "accion")]
    pub action: Action,
    #[serde(rename = "nivel_riesgo_actualizado")]
    pub risk: RiskLevel,
    #[serde(rename = "bloqueo_detectado", skip_serializing_if = "Option::is_none", default)]
    pub blocker: Option<BlockerRecord>,
    #[serde(rename = "pregunta", skip_serializing_if = "Option::is_none", default)]
    pub question: Option<String>,
    #[serde(rename = "razon_cierre", skip_serializing_if = "Option::is_none", default)]
    pub close_reason: Option<CloseReason>,
}

impl TurnDecision {
    pub fn probe(risk: RiskLevel, blocker: Option<BlockerRecord>, question: String) -> Self {
        Self {
            action: Action::Probe,
            risk,
            blocker,
            question: Some(question),
            close_reason: None,
        }
    }

    pub fn close(risk: RiskLevel, blocker: Option<BlockerRecord>, reason: CloseReason) -> Self {
        Self {
            action: Action::Close,
            risk,
            blocker,
            question: None,
            close_reason: Some(reason),
        }
    }

    pub fn is_close(&self) -> bool {
        self.action == Action::Close
    }

    /// Blocker outcome in its wire shape.
    pub fn detection(&self) -> BlockerDetection {
        BlockerDetection::from(self.blocker.clone())
    }

    pub fn next_phase(&self) -> TriagePhase {
        match self.action {
            Action::Probe => TriagePhase::Probing,
            Action::Close => TriagePhase::Closed,
        }
    }
}
