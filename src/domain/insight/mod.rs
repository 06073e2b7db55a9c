//! Insight module.
//!
//! HR-facing findings synthesized from closed conversations, their review
//! workflow, and the filters and statistics used to list them.

mod filter;
mod generator;
mod insight;
mod stats;
mod status;
mod templates;

pub use filter::InsightFilter;
pub use generator::InsightGenerator;
pub use insight::{Insight, InsightDraft, InsightReview};
pub use stats::InsightStats;
pub use status::{InsightSeverity, InsightStatus, InsightType};
pub use templates::{InsightTemplates, RecommendationTemplate, TemplateVars, TitleOverride};
