//! Insight handlers: HR review and listing.

mod list_insights;
mod review_insight;

pub use list_insights::ListInsightsHandler;
pub use review_insight::{ReviewInsightCommand, ReviewInsightHandler};
