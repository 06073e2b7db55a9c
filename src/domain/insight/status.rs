//! Insight classification and workflow status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;
use crate::domain::triage::BlockerSeverity;

/// Kind of organizational finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsightType {
    /// An obstacle outside the employee's control.
    #[serde(rename = "bloqueo_organizacional")]
    OrganizationalBlocker,
    /// The same problem keeps coming back.
    #[serde(rename = "problema_persistente")]
    PersistentProblem,
    /// The employee already tried to fix it and failed.
    #[serde(rename = "accion_fallida")]
    FailedAction,
}

impl InsightType {
    pub const ALL: [InsightType; 3] = [
        InsightType::OrganizationalBlocker,
        InsightType::PersistentProblem,
        InsightType::FailedAction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::OrganizationalBlocker => "bloqueo_organizacional",
            InsightType::PersistentProblem => "problema_persistente",
            InsightType::FailedAction => "accion_fallida",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of an insight, one level wider than blocker severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InsightSeverity {
    #[serde(rename = "baja")]
    Low,
    #[default]
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "critica")]
    Critical,
}

impl InsightSeverity {
    pub const ALL: [InsightSeverity; 4] = [
        InsightSeverity::Low,
        InsightSeverity::Medium,
        InsightSeverity::High,
        InsightSeverity::Critical,
    ];

    /// One level up; critical stays critical.
    pub fn escalate(self) -> Self {
        match self {
            InsightSeverity::Low => InsightSeverity::Medium,
            InsightSeverity::Medium => InsightSeverity::High,
            InsightSeverity::High | InsightSeverity::Critical => InsightSeverity::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightSeverity::Low => "baja",
            InsightSeverity::Medium => "media",
            InsightSeverity::High => "alta",
            InsightSeverity::Critical => "critica",
        }
    }
}

impl From<BlockerSeverity> for InsightSeverity {
    fn from(severity: BlockerSeverity) -> Self {
        match severity {
            BlockerSeverity::Low => InsightSeverity::Low,
            BlockerSeverity::Medium => InsightSeverity::Medium,
            BlockerSeverity::High => InsightSeverity::High,
        }
    }
}

impl fmt::Display for InsightSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HR workflow status of an insight.
///
/// ```text
/// nuevo ──► revisado ◄──► en_accion ──► resuelto
///   │           │             ▲            │
///   │           └──► resuelto │            │
///   └──► en_accion / resuelto └── reopen ──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InsightStatus {
    #[default]
    #[serde(rename = "nuevo")]
    New,
    #[serde(rename = "revisado")]
    Reviewed,
    #[serde(rename = "en_accion")]
    InAction,
    #[serde(rename = "resuelto")]
    Resolved,
}

impl InsightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightStatus::New => "nuevo",
            InsightStatus::Reviewed => "revisado",
            InsightStatus::InAction => "en_accion",
            InsightStatus::Resolved => "resuelto",
        }
    }
}

impl fmt::Display for InsightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for InsightStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InsightStatus::*;
        match self {
            New => vec![Reviewed, InAction, Resolved],
            Reviewed => vec![InAction, Resolved],
            InAction => vec![Reviewed, Resolved],
            Resolved => vec![InAction],
        }
    }
}
