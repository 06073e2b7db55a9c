//! Triage handlers: start, reply and batch flows.

mod batch_triage;
mod process_reply;
mod start_triage;

pub use batch_triage::{BatchTriageHandler, BatchTriageResult};
pub use process_reply::{ProcessReplyCommand, ProcessReplyHandler, ProcessReplyResult};
pub use start_triage::{StartTriageCommand, StartTriageHandler, StartTriageResult};
