//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers drive triage conversations; query handlers serve HR.

mod errors;
pub mod handlers;

pub use errors::TriageError;
pub use handlers::{
    // Triage
    BatchTriageHandler, BatchTriageResult, ProcessReplyCommand, ProcessReplyHandler,
    ProcessReplyResult, StartTriageCommand, StartTriageHandler, StartTriageResult,
    // Insights
    ListInsightsHandler, ReviewInsightCommand, ReviewInsightHandler,
};
