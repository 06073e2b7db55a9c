//! Agent configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::triage::TriageRules;

/// Overrides for the triage agent.
///
/// Unset values keep whatever the rules file (or the built-in rules)
/// provides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig {
    /// Maximum employee replies per conversation
    pub max_turns: Option<usize>,

    /// Accumulated blockers that escalate risk to critical
    pub critical_blocker_threshold: Option<usize>,

    /// Categories that always trigger follow-up (comma-separated in env)
    pub always_probe_categories: Option<Vec<String>>,

    /// YAML file with a full rules table
    pub rules_path: Option<PathBuf>,

    /// YAML file with insight title and recommendation templates
    pub templates_path: Option<PathBuf>,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(max_turns) = self.max_turns {
            if max_turns == 0 || max_turns > 20 {
                return Err(ValidationError::InvalidMaxTurns(max_turns));
            }
        }
        if self.critical_blocker_threshold == Some(0) {
            return Err(ValidationError::InvalidBlockerThreshold);
        }
        if let Some(categories) = &self.always_probe_categories {
            if categories.iter().any(|c| c.trim().is_empty()) {
                return Err(ValidationError::EmptyProbeCategory);
            }
        }
        Ok(())
    }

    /// Applies the set overrides on top of `rules`.
    pub fn apply_to(&self, rules: &mut TriageRules) {
        if let Some(max_turns) = self.max_turns {
            rules.max_turns = max_turns;
        }
        if let Some(threshold) = self.critical_blocker_threshold {
            rules.critical_blocker_threshold = threshold;
        }
        if let Some(categories) = &self.always_probe_categories {
            rules.always_probe_categories = categories
                .iter()
                .map(|c| c.trim().to_lowercase())
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_override_nothing() {
        let mut rules = TriageRules::default();
        AgentConfig::default().apply_to(&mut rules);
        assert_eq!(rules, TriageRules::default());
    }

    #[test]
    fn overrides_replace_rule_values() {
        let config = AgentConfig {
            max_turns: Some(5),
            critical_blocker_threshold: Some(2),
            always_probe_categories: Some(vec![" Acoso ".to_string()]),
            ..Default::default()
        };
        let mut rules = TriageRules::default();
        config.apply_to(&mut rules);

        assert_eq!(rules.max_turns, 5);
        assert_eq!(rules.critical_blocker_threshold, 2);
        assert_eq!(rules.always_probe_categories, vec!["acoso".to_string()]);
    }

    #[test]
    fn zero_turns_is_invalid() {
        let config = AgentConfig {
            max_turns: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMaxTurns(0))
        ));
    }

    #[test]
    fn zero_threshold_is_invalid() {
        let config = AgentConfig {
            critical_blocker_threshold: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_always_follow_up_category_is_invalid() {
        let config = AgentConfig {
            always_probe_categories: Some(vec!["acoso".to_string(), "  ".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
