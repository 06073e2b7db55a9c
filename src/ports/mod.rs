//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `FeedbackAnalyzer` - NLP scoring of a single comment
//! - `ConversationStore` - Conversation and insight persistence

mod conversation_store;
mod feedback_analyzer;

pub use conversation_store::{ConversationStore, StoreError};
pub use feedback_analyzer::{AnalysisError, FeedbackAnalyzer};
