//! Conversation lifecycle states.
//!
//! `ConversationStatus` is the persisted `estado` of a conversation;
//! `TriagePhase` is the agent's view of where the dialogue stands.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Persisted status of a follow-up conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConversationStatus {
    /// Accepting employee replies.
    #[default]
    #[serde(rename = "activa")]
    Active,
    /// Closed; the conversation is read-only.
    #[serde(rename = "cerrada")]
    Closed,
}

impl ConversationStatus {
    /// Returns true if the conversation can still be modified.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl StateMachine for ConversationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (Self::Active, Self::Closed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Active => vec![Self::Closed],
            Self::Closed => vec![],
        }
    }
}

/// Phase of the triage dialogue.
///
/// - `Started`: the comment has been scored, nothing persisted yet
/// - `Probing`: follow-up questions are being asked
/// - `Closed`: the dialogue is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TriagePhase {
    #[default]
    #[serde(rename = "iniciada")]
    Started,
    #[serde(rename = "profundizando")]
    Probing,
    #[serde(rename = "cerrada")]
    Closed,
}

impl StateMachine for TriagePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TriagePhase::*;
        matches!(
            (self, target),
            (Started, Probing) | (Probing, Probing) | (Probing, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TriagePhase::*;
        match self {
            Started => vec![Probing],
            Probing => vec![Probing, Closed],
            Closed => vec![],
        }
    }
}

impl From<ConversationStatus> for TriagePhase {
    fn from(status: ConversationStatus) -> Self {
        match status {
            ConversationStatus::Active => TriagePhase::Probing,
            ConversationStatus::Closed => TriagePhase::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod conversation_status {
        use super::*;

        #[test]
        fn default_is_active() {
            assert_eq!(ConversationStatus::default(), ConversationStatus::Active);
        }

        #[test]
        fn active_closes() {
            let status = ConversationStatus::Active;
            assert_eq!(
                status.transition_to(ConversationStatus::Closed).unwrap(),
                ConversationStatus::Closed
            );
        }

        #[test]
        fn closed_is_terminal() {
            assert!(ConversationStatus::Closed.is_terminal());
            assert!(ConversationStatus::Closed
                .transition_to(ConversationStatus::Active)
                .is_err());
        }

        #[test]
        fn serializes_to_wire_names() {
            assert_eq!(
                serde_json::to_string(&ConversationStatus::Closed).unwrap(),
                "\"cerrada\""
            );
        }
    }

    mod triage_phase {
        use super::*;

        #[test]
        fn probing_loops_until_closed() {
            assert!(TriagePhase::Probing.can_transition_to(&TriagePhase::Probing));
            assert!(TriagePhase::Probing.can_transition_to(&TriagePhase::Closed));
        }

        #[test]
        fn started_cannot_close_directly() {
            assert!(!TriagePhase::Started.can_transition_to(&TriagePhase::Closed));
        }

        #[test]
        fn closed_is_terminal() {
            assert!(TriagePhase::Closed.is_terminal());
        }

        #[test]
        fn valid_transitions_match_can_transition_to() {
            for phase in [TriagePhase::Started, TriagePhase::Probing, TriagePhase::Closed] {
                for target in phase.valid_transitions() {
                    assert!(phase.can_transition_to(&target));
                }
            }
        }

        #[test]
        fn derives_from_conversation_status() {
            assert_eq!(TriagePhase::from(ConversationStatus::Active), TriagePhase::Probing);
            assert_eq!(TriagePhase::from(ConversationStatus::Closed), TriagePhase::Closed);
        }
    }
}
