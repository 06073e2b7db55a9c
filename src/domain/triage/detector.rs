//! Organizational blocker detection.
//!
//! `BlockerDetector` is the seam; `KeywordBlockerDetector` scans a reply
//! against the configured phrase sets in priority order.

use regex::Regex;

use super::blocker::{BlockerRecord, BlockerSeverity, BlockerType};
use super::message::Message;
use super::rules::BlockerKeywords;
use crate::domain::foundation::ValidationError;

/// Classifies a single employee reply into at most one blocker.
///
/// Implementations must be deterministic for identical input.
pub trait BlockerDetector: Send + Sync {
    /// Detects a blocker in `text`. `previous` is the transcript so far, for
    /// detectors that need context; keyword matching ignores it.
    fn detect(&self, text: &str, previous: &[Message]) -> Option<BlockerRecord>;
}

/// Keyword-based detector.
///
/// Categories are tried in the configured priority order and the first one
/// with a matching phrase wins.
#[derive(Debug, Clone)]
pub struct KeywordBlockerDetector {
    keywords: BlockerKeywords,
    duration: Regex,
}

impl KeywordBlockerDetector {
    /// Builds a detector, compiling the duration pattern.
    pub fn new(keywords: BlockerKeywords) -> Result<Self, ValidationError> {
        let duration = Regex::new(&keywords.duration_pattern)
            .map_err(|e| ValidationError::invalid_format("duration_pattern", e.to_string()))?;
        Ok(Self { keywords, duration })
    }

    /// Returns the severity implied by intensifiers or duration phrases.
    pub fn severity_of(&self, text: &str) -> BlockerSeverity {
        let lower = text.to_lowercase();
        if self.has_intensifier(&lower) || self.duration.is_match(&lower) {
            BlockerSeverity::High
        } else {
            BlockerSeverity::Medium
        }
    }

    fn has_intensifier(&self, lower: &str) -> bool {
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        self.keywords.intensifiers.iter().any(|marker| {
            let marker = marker.to_lowercase();
            if marker.contains(' ') {
                lower.contains(&marker)
            } else {
                words.iter().any(|w| *w == marker)
            }
        })
    }

    /// Finds the evidence clause for the first category with a match.
    fn classify(&self, text: &str) -> Option<(BlockerType, String)> {
        let lower = text.to_lowercase();
        let clauses = split_clauses(text);

        self.keywords.priority.iter().copied().find_map(|blocker_type| {
            let phrases: Vec<String> = self
                .keywords
                .phrases_for(blocker_type)
                .iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.is_empty())
                .collect();

            if !phrases.iter().any(|p| lower.contains(p)) {
                return None;
            }

            let evidence = clauses
                .iter()
                .filter(|clause| {
                    let clause = clause.to_lowercase();
                    phrases.iter().any(|p| clause.contains(p))
                })
                .min_by_key(|clause| clause.chars().count())
                .map(|clause| clause.to_string())
                // The phrase spans a clause separator.
                .unwrap_or_else(|| text.trim().to_string());

            Some((blocker_type, evidence))
        })
    }
}

impl BlockerDetector for KeywordBlockerDetector {
    fn detect(&self, text: &str, _previous: &[Message]) -> Option<BlockerRecord> {
        if text.trim().is_empty() {
            return None;
        }
        let (blocker_type, evidence) = self.classify(text)?;
        // Modifiers count only inside the clause that names the blocker.
        let severity = self.severity_of(&evidence);
        Some(BlockerRecord::new(blocker_type, severity, evidence))
    }
}

/// Splits text into trimmed, non-empty clauses.
fn split_clauses(text: &str) -> Vec<&str> {
    text.split(|c: char| matches!(c, '.' | ',' | ';' | '!' | '?' | '¡' | '¿' | '\n'))
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect()
}
