//! Mock Feedback Analyzer for testing.
//!
//! Returns scripted analyses in order, with error injection and call
//! tracking. When the script runs out it falls back to the keyword analyzer.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::KeywordFeedbackAnalyzer;
use crate::domain::feedback::InitialAnalysis;
use crate::ports::{AnalysisError, FeedbackAnalyzer};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockAnalysis {
    Success(InitialAnalysis),
    Error(AnalysisError),
}

/// Scripted analyzer.
#[derive(Debug, Clone, Default)]
pub struct MockFeedbackAnalyzer {
    responses: Arc<Mutex<VecDeque<MockAnalysis>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fallback: KeywordFeedbackAnalyzer,
}

impl MockFeedbackAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful analysis.
    pub fn with_analysis(self, analysis: InitialAnalysis) -> Self {
        self.push(MockAnalysis::Success(analysis));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: AnalysisError) -> Self {
        self.push(MockAnalysis::Error(error));
        self
    }

    /// Returns the number of calls made to this analyzer.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns the analyzed texts in call order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, response: MockAnalysis) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    fn next_response(&self) -> Option<MockAnalysis> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

#[async_trait]
impl FeedbackAnalyzer for MockFeedbackAnalyzer {
    async fn analyze(&self, text: &str) -> Result<InitialAnalysis, AnalysisError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());

        match self.next_response() {
            Some(MockAnalysis::Success(analysis)) => Ok(analysis),
            Some(MockAnalysis::Error(err)) => Err(err),
            None => Ok(self.fallback.analyze_text(text)),
        }
    }
}
