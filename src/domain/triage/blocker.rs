//! Organizational blocker records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of organizational obstacle.
///
/// Declaration order is the detection priority: when a reply matches more
/// than one category, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockerType {
    /// Leadership unresponsiveness or unavailability.
    #[serde(rename = "liderazgo")]
    Leadership,
    /// Promised or missing resources.
    #[serde(rename = "recursos")]
    Resources,
    /// Bureaucratic or broken process.
    #[serde(rename = "proceso")]
    Process,
    /// Cultural resignation ("así es aquí").
    #[serde(rename = "cultural")]
    Cultural,
}

impl BlockerType {
    /// All types in detection priority order.
    pub const PRIORITY: [BlockerType; 4] = [
        BlockerType::Leadership,
        BlockerType::Resources,
        BlockerType::Process,
        BlockerType::Cultural,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockerType::Leadership => "liderazgo",
            BlockerType::Resources => "recursos",
            BlockerType::Process => "proceso",
            BlockerType::Cultural => "cultural",
        }
    }

    /// Human-readable description used in blocker records.
    pub fn description(&self) -> &'static str {
        match self {
            BlockerType::Leadership => "El liderazgo no está accesible o no responde",
            BlockerType::Resources => "Recursos prometidos o necesarios que no se entregan",
            BlockerType::Process => "Procesos burocráticos que frenan el trabajo",
            BlockerType::Cultural => "Resignación cultural ante problemas conocidos",
        }
    }
}

impl fmt::Display for BlockerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a single blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum BlockerSeverity {
    #[serde(rename = "baja")]
    Low,
    #[default]
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl BlockerSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockerSeverity::Low => "baja",
            BlockerSeverity::Medium => "media",
            BlockerSeverity::High => "alta",
        }
    }
}

impl fmt::Display for BlockerSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A blocker detected in one employee reply.
///
/// Owned by the conversation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockerRecord {
    #[serde(rename = "tipo")]
    pub blocker_type: BlockerType,
    #[serde(rename = "severidad")]
    pub severity: BlockerSeverity,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Verbatim excerpt of the triggering clause.
    #[serde(rename = "evidencia")]
    pub evidence: String,
}

impl BlockerRecord {
    pub fn new(
        blocker_type: BlockerType,
        severity: BlockerSeverity,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            blocker_type,
            severity,
            description: blocker_type.description().to_string(),
            evidence: evidence.into(),
        }
    }
}

/// Wire shape of a detection result: `{hay_bloqueo: false}` or the record
/// fields alongside `hay_bloqueo: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockerDetection {
    pub hay_bloqueo: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub bloqueo: Option<BlockerRecord>,
}

impl From<Option<BlockerRecord>> for BlockerDetection {
    fn from(record: Option<BlockerRecord>) -> Self {
        Self {
            hay_bloqueo: record.is_some(),
            bloqueo: record,
        }
    }
}
