//! Risk level of a follow-up conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::feedback::StressLevel;

/// Running assessment of how urgently a conversation needs human attention.
///
/// Ordered from least to most urgent. Within one conversation the level only
/// ever moves up; use [`RiskLevel::escalate_to`] rather than assigning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum RiskLevel {
    #[default]
    #[serde(rename = "bajo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
    #[serde(rename = "critico")]
    Critical,
}

impl RiskLevel {
    /// Initial risk implied by the stress level of the opening comment.
    pub fn from_stress(level: StressLevel) -> Self {
        match level {
            StressLevel::Low => RiskLevel::Low,
            StressLevel::Medium => RiskLevel::Medium,
            StressLevel::High => RiskLevel::High,
        }
    }

    /// Returns the higher of the two levels.
    pub fn escalate_to(self, floor: RiskLevel) -> RiskLevel {
        self.max(floor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "bajo",
            RiskLevel::Medium => "medio",
            RiskLevel::High => "alto",
            RiskLevel::Critical => "critico",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_urgency() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn escalate_never_lowers() {
        assert_eq!(RiskLevel::Critical.escalate_to(RiskLevel::High), RiskLevel::Critical);
        assert_eq!(RiskLevel::Medium.escalate_to(RiskLevel::High), RiskLevel::High);
        assert_eq!(RiskLevel::Low.escalate_to(RiskLevel::Low), RiskLevel::Low);
    }

    #[test]
    fn from_stress_maps_each_level() {
        assert_eq!(RiskLevel::from_stress(StressLevel::Low), RiskLevel::Low);
        assert_eq!(RiskLevel::from_stress(StressLevel::Medium), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_stress(StressLevel::High), RiskLevel::High);
    }

    #[test]
    fn serializes_with_wire_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::Critical).unwrap(), "\"critico\"");
        let level: RiskLevel = serde_json::from_str("\"medio\"").unwrap();
        assert_eq!(level, RiskLevel::Medium);
    }
}
