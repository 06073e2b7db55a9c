//! Bienestar Triage - Conversational triage for employee well-being feedback
//!
//! This crate decides when a feedback comment deserves a follow-up dialogue,
//! drives that dialogue turn by turn while detecting organizational blockers,
//! and synthesizes an HR-reviewable insight when the dialogue closes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
