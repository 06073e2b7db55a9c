//! Conversational triage agent.
//!
//! Decides whether an opening comment warrants follow-up and, turn by turn,
//! whether to keep probing or close. The agent holds only configuration; all
//! conversation state comes in through the call arguments.

use std::sync::Arc;

use super::blocker::{BlockerRecord, BlockerSeverity};
use super::decision::{CloseReason, StartContext, StartDecision, TurnContext, TurnDecision};
use super::detector::{BlockerDetector, KeywordBlockerDetector};
use super::message::{count_employee_replies, Message};
use super::risk::RiskLevel;
use super::rules::TriageRules;
use crate::domain::feedback::{InitialAnalysis, StressLevel};
use crate::domain::foundation::ValidationError;

/// Comments shorter than this (in characters, trimmed) are non-informative.
pub const MIN_INFORMATIVE_CHARS: usize = 3;

/// Stateless triage decision maker.
#[derive(Clone)]
pub struct ConversationAgent {
    rules: TriageRules,
    detector: Arc<dyn BlockerDetector>,
}

impl std::fmt::Debug for ConversationAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationAgent")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl ConversationAgent {
    pub fn new(rules: TriageRules, detector: Arc<dyn BlockerDetector>) -> Self {
        Self { rules, detector }
    }

    /// Builds an agent with a [`KeywordBlockerDetector`] over the rules'
    /// keyword sets.
    pub fn with_keyword_detector(rules: TriageRules) -> Result<Self, ValidationError> {
        let detector = KeywordBlockerDetector::new(rules.blockers.clone())?;
        Ok(Self::new(rules, Arc::new(detector)))
    }

    pub fn rules(&self) -> &TriageRules {
        &self.rules
    }

    pub fn detector(&self) -> &Arc<dyn BlockerDetector> {
        &self.detector
    }

    /// Scores an opening comment.
    ///
    /// Follow-up is required when stress is medium or high, or when the top
    /// category is in the always-probe set. Empty or non-informative text
    /// never triggers follow-up.
    pub fn start(
        &self,
        initial_text: &str,
        analysis: &InitialAnalysis,
        _context: &StartContext,
    ) -> StartDecision {
        let category = analysis.top_category_label().to_string();

        if initial_text.trim().chars().count() < MIN_INFORMATIVE_CHARS {
            return Self::no_follow_up(
                "Comentario vacío o no informativo",
                category,
                analysis,
            );
        }

        let (risk, reason) = match analysis.stress_level() {
            level @ (StressLevel::Medium | StressLevel::High) => (
                RiskLevel::from_stress(level),
                format!("Nivel de estrés {}", level),
            ),
            StressLevel::Low if self.rules.is_always_probe(&category) => (
                RiskLevel::Medium,
                format!("Categoría sensible: {}", category),
            ),
            StressLevel::Low => {
                return Self::no_follow_up(
                    "Nivel de estrés bajo sin categorías sensibles",
                    category,
                    analysis,
                );
            }
        };

        let question = self.rules.questions.opening_question(&category).to_string();
        StartDecision {
            requires_follow_up: true,
            risk,
            reason,
            question: Some(question),
            primary_category: category,
            analysis: analysis.clone(),
        }
    }

    /// Decides the next move after an employee reply.
    ///
    /// `previous` is the transcript before this reply. Stop conditions are
    /// checked in order: unusable reply, decline phrase, turn limit, nothing
    /// new learned, no unasked question left. A reply that names a blocker
    /// is never read as a decline.
    pub fn advance(&self, reply: &str, context: &TurnContext, previous: &[Message]) -> TurnDecision {
        if !is_usable_reply(reply) {
            return TurnDecision::close(context.risk, None, CloseReason::InvalidReply);
        }

        let blocker = self.detector.detect(reply, previous);
        if blocker.is_none() && self.rules.decline_phrase_in(reply).is_some() {
            return TurnDecision::close(context.risk, None, CloseReason::Declined);
        }
        let risk = self.reassess_risk(context, blocker.as_ref());

        let reply_number = count_employee_replies(previous) + 1;
        if reply_number >= self.rules.max_turns {
            return TurnDecision::close(risk, blocker, CloseReason::MaxTurns);
        }
        if blocker.is_none() && risk == context.risk && reply_number > 1 {
            return TurnDecision::close(risk, blocker, CloseReason::DiminishingReturns);
        }

        match self.next_question(context, blocker.as_ref(), previous) {
            Some(question) => TurnDecision::probe(risk, blocker, question),
            None => TurnDecision::close(risk, blocker, CloseReason::QuestionsExhausted),
        }
    }

    fn reassess_risk(&self, context: &TurnContext, blocker: Option<&BlockerRecord>) -> RiskLevel {
        let mut risk = context.risk;
        if blocker.is_some_and(|b| b.severity == BlockerSeverity::High) {
            risk = risk.escalate_to(RiskLevel::High);
        }
        let total = context.previous_blockers.len() + usize::from(blocker.is_some());
        if total >= self.rules.critical_blocker_threshold {
            risk = risk.escalate_to(RiskLevel::Critical);
        }
        risk
    }

    /// First candidate not yet asked: blocker-specific, then category, then
    /// generic.
    fn next_question(
        &self,
        context: &TurnContext,
        blocker: Option<&BlockerRecord>,
        previous: &[Message],
    ) -> Option<String> {
        let asked: Vec<String> = previous
            .iter()
            .filter(|m| m.is_agent())
            .map(|m| normalize(m.content()))
            .collect();

        let bank = &self.rules.questions;
        let blocker_questions = blocker
            .map(|b| bank.blocker_questions(b.blocker_type))
            .unwrap_or(&[]);

        blocker_questions
            .iter()
            .chain(bank.category_questions(&context.primary_category))
            .chain(&bank.generic)
            .find(|q| !q.trim().is_empty() && !asked.contains(&normalize(q)))
            .cloned()
    }

    fn no_follow_up(reason: &str, category: String, analysis: &InitialAnalysis) -> StartDecision {
        StartDecision {
            requires_follow_up: false,
            risk: RiskLevel::Low,
            reason: reason.to_string(),
            question: None,
            primary_category: category,
            analysis: analysis.clone(),
        }
    }
}

/// A reply must contain at least one letter or digit.
fn is_usable_reply(reply: &str) -> bool {
    reply.chars().any(char::is_alphanumeric)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
