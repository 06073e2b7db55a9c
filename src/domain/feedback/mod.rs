//! Feedback module.
//!
//! Types produced by the external NLP collaborator for a single comment.
//! The triage agent only ever reads them.

mod analysis;

pub use analysis::{
    CategoryScore, EmotionScore, InitialAnalysis, SentimentDistribution, StressAssessment,
    StressLevel,
};
