//! NLP adapters implementing `FeedbackAnalyzer`.

mod keyword_analyzer;
mod mock_analyzer;

pub use keyword_analyzer::KeywordFeedbackAnalyzer;
pub use mock_analyzer::{MockAnalysis, MockFeedbackAnalyzer};
