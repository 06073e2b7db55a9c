//! Transcript messages.
//!
//! A message is the `{rol, contenido}` record that is persisted and replayed
//! for every turn. The serialized shape carries exactly those two keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Who wrote a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The employee giving feedback.
    #[serde(rename = "empleado")]
    Employee,
    /// The triage agent asking follow-up questions.
    #[serde(rename = "agente")]
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "empleado",
            Role::Agent => "agente",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn-ordered transcript entry.
///
/// # Invariants
///
/// - `content` is non-blank when built through the constructors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "rol")]
    role: Role,
    #[serde(rename = "contenido")]
    content: String,
}

impl Message {
    /// Creates a message, rejecting blank content.
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("contenido"));
        }
        Ok(Self { role, content })
    }

    /// Creates an employee message.
    pub fn employee(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::Employee, content)
    }

    /// Creates an agent message.
    pub fn agent(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Role::Agent, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }

    pub fn is_agent(&self) -> bool {
        self.role == Role::Agent
    }
}

/// Counts employee replies in a transcript.
///
/// The opening comment precedes the first agent question and is not a reply.
pub fn count_employee_replies(messages: &[Message]) -> usize {
    match messages.iter().position(Message::is_agent) {
        Some(first_question) => messages[first_question..]
            .iter()
            .filter(|m| m.is_employee())
            .count(),
        None => 0,
    }
}

/// Renders a transcript as `rol: contenido` lines.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}
