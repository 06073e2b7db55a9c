//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod insight;
pub mod triage;

#[cfg(test)]
pub(crate) mod test_support;

pub use insight::{ListInsightsHandler, ReviewInsightCommand, ReviewInsightHandler};
pub use triage::{
    BatchTriageHandler, BatchTriageResult, ProcessReplyCommand, ProcessReplyHandler,
    ProcessReplyResult, StartTriageCommand, StartTriageHandler, StartTriageResult,
};
