//! Insight entity.
//!
//! An insight is the HR-facing summary of one closed conversation. Its
//! content is fixed at creation; only the review workflow fields change.

use serde::{Deserialize, Serialize};

use super::status::{InsightSeverity, InsightStatus, InsightType};
use crate::domain::foundation::{
    ConversationId, DomainError, InsightId, StateMachine, Timestamp,
};

/// Structured finding synthesized from a closed conversation.
///
/// # Invariants
///
/// - references exactly one conversation
/// - only `status`, `hr_notes`, `reviewed_by` and `reviewed_at` change after
///   creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    id: InsightId,

    #[serde(rename = "tipo")]
    insight_type: InsightType,

    #[serde(rename = "categoria")]
    category: String,

    #[serde(rename = "titulo")]
    title: String,

    #[serde(rename = "severidad")]
    severity: InsightSeverity,

    #[serde(rename = "descripcion")]
    description: String,

    /// Full transcript as `rol: contenido` lines.
    #[serde(rename = "contexto_completo")]
    full_context: String,

    #[serde(rename = "evidencias")]
    evidence: Vec<String>,

    #[serde(rename = "recomendacion_rrhh")]
    recommendation: String,

    #[serde(rename = "estado")]
    status: InsightStatus,

    #[serde(rename = "notas_rrhh")]
    hr_notes: Option<String>,

    #[serde(rename = "revisado_por")]
    reviewed_by: Option<String>,

    #[serde(rename = "fecha_revision")]
    reviewed_at: Option<Timestamp>,

    #[serde(rename = "departamento")]
    department: String,

    #[serde(rename = "equipo")]
    team: String,

    #[serde(rename = "conversacion_id")]
    conversation_id: ConversationId,

    created_at: Timestamp,
}

/// Content of a new insight, before workflow fields exist.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightDraft {
    pub insight_type: InsightType,
    pub category: String,
    pub title: String,
    pub severity: InsightSeverity,
    pub description: String,
    pub full_context: String,
    pub evidence: Vec<String>,
    pub recommendation: String,
    pub department: String,
    pub team: String,
    pub conversation_id: ConversationId,
}

/// HR review patch. Carries workflow fields only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsightReview {
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InsightStatus>,
    #[serde(rename = "notas_rrhh", default, skip_serializing_if = "Option::is_none")]
    pub hr_notes: Option<String>,
    #[serde(rename = "revisado_por", default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}

impl InsightReview {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.hr_notes.is_none() && self.reviewed_by.is_none()
    }
}

impl Insight {
    /// Creates a new insight in status `nuevo`.
    pub fn new(draft: InsightDraft) -> Self {
        Self {
            id: InsightId::new(),
            insight_type: draft.insight_type,
            category: draft.category,
            title: draft.title,
            severity: draft.severity,
            description: draft.description,
            full_context: draft.full_context,
            evidence: draft.evidence,
            recommendation: draft.recommendation,
            status: InsightStatus::New,
            hr_notes: None,
            reviewed_by: None,
            reviewed_at: None,
            department: draft.department,
            team: draft.team,
            conversation_id: draft.conversation_id,
            created_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &InsightId {
        &self.id
    }

    pub fn insight_type(&self) -> InsightType {
        self.insight_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn severity(&self) -> InsightSeverity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn full_context(&self) -> &str {
        &self.full_context
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    pub fn status(&self) -> InsightStatus {
        self.status
    }

    pub fn hr_notes(&self) -> Option<&str> {
        self.hr_notes.as_deref()
    }

    pub fn reviewed_by(&self) -> Option<&str> {
        self.reviewed_by.as_deref()
    }

    pub fn reviewed_at(&self) -> Option<&Timestamp> {
        self.reviewed_at.as_ref()
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Workflow
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies an HR review and stamps `fecha_revision`.
    ///
    /// Keeping the current status is allowed (notes-only review).
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the review carries nothing
    /// - `InvalidStateTransition` if the status change is not allowed
    pub fn apply_review(&mut self, review: InsightReview) -> Result<(), DomainError> {
        if review.is_empty() {
            return Err(DomainError::validation("review", "Review carries no changes"));
        }

        if let Some(target) = review.status {
            if target != self.status {
                self.status = self.status.transition_to(target)?;
            }
        }
        if let Some(notes) = review.hr_notes {
            self.hr_notes = Some(notes);
        }
        if let Some(reviewer) = review.reviewed_by {
            self.reviewed_by = Some(reviewer);
        }
        self.reviewed_at = Some(Timestamp::now());
        Ok(())
    }
}
