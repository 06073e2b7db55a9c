//! Adapters - Implementations of port interfaces.
//!
//! - `nlp` - Feedback analyzers (keyword heuristics, scripted mock)
//! - `storage` - Conversation stores (in-memory)

pub mod nlp;
pub mod storage;

pub use nlp::{KeywordFeedbackAnalyzer, MockAnalysis, MockFeedbackAnalyzer};
pub use storage::InMemoryConversationStore;
