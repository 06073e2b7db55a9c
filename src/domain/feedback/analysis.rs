//! Initial NLP analysis of a feedback comment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stress level inferred from the sentiment of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum StressLevel {
    #[default]
    #[serde(rename = "bajo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
}

impl StressLevel {
    /// Returns the wire name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "bajo",
            StressLevel::Medium => "medio",
            StressLevel::High => "alto",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dominant emotion with its classifier confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Emotion reported for comments too short to classify.
    pub fn undefined() -> Self {
        Self::new("indefinido", 0.0)
    }
}

/// Sentiment probability mass per polarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentDistribution {
    pub fn new(positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            positive,
            neutral,
            negative,
        }
    }

    /// Fully neutral distribution.
    pub fn neutral() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }
}

impl Default for SentimentDistribution {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Stress level plus the sentiment distribution it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressAssessment {
    pub level: StressLevel,
    #[serde(default)]
    pub sentiment_dist: SentimentDistribution,
}

impl StressAssessment {
    pub fn new(level: StressLevel, sentiment_dist: SentimentDistribution) -> Self {
        Self {
            level,
            sentiment_dist,
        }
    }
}

/// Topic category with its zero-shot score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub label: String,
    pub score: f64,
}

impl CategoryScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Result of the NLP collaborator for one comment.
///
/// `categories` is ordered by descending score; the first entry is the
/// top category used to steer the follow-up dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialAnalysis {
    pub emotion: EmotionScore,
    pub stress: StressAssessment,
    #[serde(default)]
    pub categories: Vec<CategoryScore>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub suggestion: String,
}

impl InitialAnalysis {
    /// Analysis reported for empty or non-informative comments.
    pub fn non_informative() -> Self {
        Self {
            emotion: EmotionScore::undefined(),
            stress: StressAssessment::new(StressLevel::Low, SentimentDistribution::neutral()),
            categories: Vec::new(),
            summary: String::new(),
            suggestion: "Comentario no informativo.".to_string(),
        }
    }

    /// Returns the highest-ranked category, if any.
    pub fn top_category(&self) -> Option<&CategoryScore> {
        self.categories.first()
    }

    /// Returns the label of the top category, or an empty string.
    pub fn top_category_label(&self) -> &str {
        self.top_category().map(|c| c.label.as_str()).unwrap_or("")
    }

    pub fn stress_level(&self) -> StressLevel {
        self.stress.level
    }
}
