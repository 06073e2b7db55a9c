//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `feedback` - Result of analyzing a single comment
//! - `triage` - Follow-up dialogue: agent, blocker detection, conversation entity
//! - `insight` - HR insights synthesized from closed conversations

pub mod feedback;
pub mod foundation;
pub mod insight;
pub mod triage;
