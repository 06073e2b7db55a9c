//! Triage module.
//!
//! The follow-up dialogue: risk levels, transcript messages, blocker
//! detection, the conversation entity and the agent that drives it.
//!
//! # Flow
//!
//! ```text
//! comment ─► ConversationAgent::start ─► (follow-up?) ─► Conversation::open
//!                                                             │
//!          reply ─► ConversationAgent::advance ◄──────────────┘
//!                      │ profundizar ─► next question
//!                      │ cerrar      ─► insight generation
//! ```

mod agent;
mod blocker;
mod conversation;
mod decision;
mod detector;
mod message;
mod risk;
mod rules;
mod state;

pub use agent::{ConversationAgent, MIN_INFORMATIVE_CHARS};
pub use blocker::{BlockerDetection, BlockerRecord, BlockerSeverity, BlockerType};
pub use conversation::Conversation;
pub use decision::{
    Action, CloseReason, StartContext, StartDecision, TurnContext, TurnDecision,
};
pub use detector::{BlockerDetector, KeywordBlockerDetector};
pub use message::{count_employee_replies, render_transcript, Message, Role};
pub use risk::RiskLevel;
pub use rules::{BlockerKeywords, QuestionBank, TriageRules, FALLBACK_QUESTION};
pub use state::{ConversationStatus, TriagePhase};
