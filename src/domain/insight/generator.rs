//! Insight synthesis from a closed conversation.

use regex::Regex;
use std::collections::BTreeMap;

use super::insight::{Insight, InsightDraft};
use super::status::{InsightSeverity, InsightType};
use super::templates::{InsightTemplates, TemplateVars};
use crate::domain::feedback::InitialAnalysis;
use crate::domain::foundation::ValidationError;
use crate::domain::triage::{
    count_employee_replies, render_transcript, BlockerRecord, BlockerType, Conversation, Message,
    RiskLevel,
};

/// Builds at most one insight per conversation.
#[derive(Debug, Clone)]
pub struct InsightGenerator {
    templates: InsightTemplates,
    attempt_pattern: Regex,
}

impl InsightGenerator {
    pub fn new(templates: InsightTemplates) -> Result<Self, ValidationError> {
        let attempt_pattern = Regex::new(&templates.attempt_pattern)
            .map_err(|e| ValidationError::invalid_format("attempt_pattern", e.to_string()))?;
        Ok(Self {
            templates,
            attempt_pattern,
        })
    }

    pub fn templates(&self) -> &InsightTemplates {
        &self.templates
    }

    /// Synthesizes the insight for a conversation.
    ///
    /// Returns `None` when there is nothing to report (no blockers and risk
    /// below critical) or when no title or recommendation template applies.
    pub fn generate(
        &self,
        conversation: &Conversation,
        analysis: &InitialAnalysis,
        messages: &[Message],
        blockers: &[BlockerRecord],
    ) -> Option<Insight> {
        let final_risk = conversation.current_risk();
        if blockers.is_empty() && final_risk != RiskLevel::Critical {
            return None;
        }

        let insight_type = self.classify(messages, blockers);
        let severity = severity_of(blockers, final_risk);

        let category = if conversation.primary_category().trim().is_empty() {
            analysis.top_category_label().to_string()
        } else {
            conversation.primary_category().to_string()
        };
        let blocker_label = dominant_blocker(blockers)
            .map(|t| t.as_str())
            .unwrap_or("riesgo crítico");

        let vars = TemplateVars {
            category: &category,
            blocker: blocker_label,
            department: conversation.department(),
            team: conversation.team(),
        };
        let title = vars.render(self.templates.title_for(insight_type, &category)?);
        let recommendation =
            vars.render(self.templates.recommendation_for(insight_type, severity)?);

        Some(Insight::new(InsightDraft {
            insight_type,
            category: if category.is_empty() {
                "general".to_string()
            } else {
                category
            },
            title,
            severity,
            description: describe(analysis, blockers, final_risk),
            full_context: render_transcript(messages),
            evidence: collect_evidence(blockers),
            recommendation,
            department: conversation.department().to_string(),
            team: conversation.team().to_string(),
            conversation_id: *conversation.id(),
        }))
    }

    /// First match wins: failed attempt, then recurrence, then plain blocker.
    pub fn classify(&self, messages: &[Message], blockers: &[BlockerRecord]) -> InsightType {
        if blockers.iter().any(|b| self.mentions_attempt(&b.evidence)) {
            return InsightType::FailedAction;
        }
        if has_repeated_type(blockers) || self.recurring_replies(messages) >= 2 {
            return InsightType::PersistentProblem;
        }
        InsightType::OrganizationalBlocker
    }

    fn mentions_attempt(&self, evidence: &str) -> bool {
        let lower = evidence.to_lowercase();
        self.templates
            .attempt_markers
            .iter()
            .any(|m| lower.contains(&m.to_lowercase()))
            || self.attempt_pattern.is_match(&lower)
    }

    /// Employee replies (opening comment excluded) with a recurrence marker.
    fn recurring_replies(&self, messages: &[Message]) -> usize {
        let total_replies = count_employee_replies(messages);
        let employee: Vec<&Message> = messages.iter().filter(|m| m.is_employee()).collect();
        employee[employee.len() - total_replies..]
            .iter()
            .filter(|m| {
                let lower = m.content().to_lowercase();
                self.templates
                    .recurrence_markers
                    .iter()
                    .any(|marker| lower.contains(&marker.to_lowercase()))
            })
            .count()
    }
}

fn has_repeated_type(blockers: &[BlockerRecord]) -> bool {
    BlockerType::PRIORITY
        .iter()
        .any(|t| blockers.iter().filter(|b| b.blocker_type == *t).count() >= 2)
}

/// Max blocker severity (media without blockers), one level up at critical
/// risk.
fn severity_of(blockers: &[BlockerRecord], final_risk: RiskLevel) -> InsightSeverity {
    let base = blockers
        .iter()
        .map(|b| InsightSeverity::from(b.severity))
        .max()
        .unwrap_or(InsightSeverity::Medium);
    if final_risk == RiskLevel::Critical {
        base.escalate()
    } else {
        base
    }
}

/// Most frequent blocker type; ties go to detection priority.
fn dominant_blocker(blockers: &[BlockerRecord]) -> Option<BlockerType> {
    let mut counts: BTreeMap<BlockerType, usize> = BTreeMap::new();
    for blocker in blockers {
        *counts.entry(blocker.blocker_type).or_default() += 1;
    }
    let max = counts.values().copied().max()?;
    counts
        .into_iter()
        .find(|(_, count)| *count == max)
        .map(|(blocker_type, _)| blocker_type)
}

/// Evidence in turn order without duplicates.
fn collect_evidence(blockers: &[BlockerRecord]) -> Vec<String> {
    let mut evidence: Vec<String> = Vec::new();
    for blocker in blockers {
        if !evidence.contains(&blocker.evidence) {
            evidence.push(blocker.evidence.clone());
        }
    }
    evidence
}

fn describe(analysis: &InitialAnalysis, blockers: &[BlockerRecord], final_risk: RiskLevel) -> String {
    let mut parts = Vec::new();
    if !analysis.summary.trim().is_empty() {
        parts.push(format!("Comentario inicial: {}.", analysis.summary.trim_end_matches('.')));
    }
    if blockers.is_empty() {
        parts.push("No se identificaron bloqueos concretos.".to_string());
    } else {
        let kinds: Vec<String> = blockers
            .iter()
            .map(|b| format!("{} ({})", b.description, b.severity))
            .collect();
        parts.push(format!("Bloqueos detectados: {}.", kinds.join("; ")));
    }
    parts.push(format!("Riesgo final: {}.", final_risk));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::{
        CategoryScore, EmotionScore, SentimentDistribution, StressAssessment, StressLevel,
    };
    use crate::domain::triage::{BlockerSeverity, StartContext, StartDecision};

    fn analysis() -> InitialAnalysis {
        InitialAnalysis {
            emotion: EmotionScore::new("tristeza", 0.8),
            stress: StressAssessment::new(
                StressLevel::High,
                SentimentDistribution::new(0.05, 0.15, 0.8),
            ),
            categories: vec![CategoryScore::new("sobrecarga laboral", 0.9)],
            summary: "Estrés por carga de trabajo".to_string(),
            suggestion: String::new(),
        }
    }

    fn conversation(risk: RiskLevel) -> Conversation {
        let decision = StartDecision {
            requires_follow_up: true,
            risk,
            reason: "Nivel de estrés alto".to_string(),
            question: Some("¿Ya intentaste hablar con tu supervisor?".to_string()),
            primary_category: "sobrecarga laboral".to_string(),
            analysis: analysis(),
        };
        Conversation::open(
            "Me siento muy estresado con la carga de trabajo actual",
            &decision,
            &StartContext::new("Ventas", "Norte"),
        )
        .unwrap()
    }

    fn with_replies(conversation: &Conversation, replies: &[&str]) -> Vec<Message> {
        let mut messages = conversation.messages().to_vec();
        for reply in replies {
            messages.push(Message::employee(*reply).unwrap());
            messages.push(Message::agent("¿Algo más?").unwrap());
        }
        messages
    }

    fn generator() -> InsightGenerator {
        InsightGenerator::new(InsightTemplates::default()).unwrap()
    }

    fn leadership(evidence: &str, severity: BlockerSeverity) -> BlockerRecord {
        BlockerRecord::new(BlockerType::Leadership, severity, evidence)
    }

    mod gate {
        use super::*;

        #[test]
        fn no_blockers_and_no_critical_risk_yields_none() {
            let conv = conversation(RiskLevel::High);
            let messages = with_replies(&conv, &["Todo bien"]);
            assert!(generator().generate(&conv, &analysis(), &messages, &[]).is_none());
        }

        #[test]
        fn critical_risk_without_blockers_yields_medium_escalated() {
            let conv = conversation(RiskLevel::Critical);
            let messages = with_replies(&conv, &["Estoy muy mal"]);
            let insight = generator().generate(&conv, &analysis(), &messages, &[]).unwrap();
            assert_eq!(insight.severity(), InsightSeverity::High);
            assert_eq!(insight.insight_type(), InsightType::OrganizationalBlocker);
        }

        #[test]
        fn missing_template_yields_none() {
            let templates = InsightTemplates {
                recommendations: Vec::new(),
                ..InsightTemplates::default()
            };
            let generator = InsightGenerator::new(templates).unwrap();
            let conv = conversation(RiskLevel::High);
            let blockers = vec![leadership("nunca responde", BlockerSeverity::High)];
            let messages = with_replies(&conv, &["Mi jefe nunca responde"]);
            assert!(generator.generate(&conv, &analysis(), &messages, &blockers).is_none());
        }
    }

    mod classification {
        use super::*;

        #[test]
        fn single_blocker_is_organizational() {
            let conv = conversation(RiskLevel::High);
            let blockers = vec![leadership(
                "pero nunca tiene tiempo para reunirse",
                BlockerSeverity::High,
            )];
            let messages = with_replies(
                &conv,
                &["Sí, pero nunca tiene tiempo para reunirse", "Llevo 2 meses intentando"],
            );
            let insight = generator()
                .generate(&conv, &analysis(), &messages, &blockers)
                .unwrap();

            assert_eq!(insight.insight_type(), InsightType::OrganizationalBlocker);
            assert_eq!(insight.severity(), InsightSeverity::High);
            assert_eq!(insight.title(), "Sobrecarga laboral bloqueada por liderazgo");
            assert_eq!(insight.evidence(), &["pero nunca tiene tiempo para reunirse".to_string()]);
            assert!(insight.recommendation().contains("Ventas"));
            assert!(insight.full_context().starts_with("empleado: Me siento muy estresado"));
            assert_eq!(insight.conversation_id(), conv.id());
        }

        #[test]
        fn attempt_in_evidence_is_failed_action() {
            let gen = generator();
            let blockers = vec![leadership("he intentado hablar y no me escucha", BlockerSeverity::Medium)];
            assert_eq!(gen.classify(&[], &blockers), InsightType::FailedAction);

            let blockers = vec![leadership("llevo semanas intentando y me ignora", BlockerSeverity::Medium)];
            assert_eq!(gen.classify(&[], &blockers), InsightType::FailedAction);
        }

        #[test]
        fn repeated_blocker_type_is_persistent() {
            let blockers = vec![
                leadership("no responde", BlockerSeverity::Medium),
                leadership("me ignora", BlockerSeverity::Medium),
            ];
            assert_eq!(generator().classify(&[], &blockers), InsightType::PersistentProblem);
        }

        #[test]
        fn recurrence_markers_in_two_replies_are_persistent() {
            let conv = conversation(RiskLevel::High);
            let messages = with_replies(
                &conv,
                &["Pasó otra vez la semana pasada", "Y de nuevo hoy"],
            );
            let blockers = vec![BlockerRecord::new(
                BlockerType::Process,
                BlockerSeverity::Medium,
                "burocracia",
            )];
            assert_eq!(
                generator().classify(&messages, &blockers),
                InsightType::PersistentProblem
            );
        }

        #[test]
        fn recurrence_in_opening_comment_does_not_count() {
            let messages = vec![
                Message::employee("Otra vez lo mismo").unwrap(),
                Message::agent("¿Qué pasó?").unwrap(),
                Message::employee("De nuevo la burocracia").unwrap(),
            ];
            let blockers = vec![BlockerRecord::new(
                BlockerType::Process,
                BlockerSeverity::Medium,
                "la burocracia",
            )];
            assert_eq!(
                generator().classify(&messages, &blockers),
                InsightType::OrganizationalBlocker
            );
        }
    }

    #[test]
    fn critical_risk_escalates_severity() {
        let conv = conversation(RiskLevel::Critical);
        let blockers = vec![leadership("no responde", BlockerSeverity::High)];
        let messages = with_replies(&conv, &["Mi jefe no responde"]);
        let insight = generator()
            .generate(&conv, &analysis(), &messages, &blockers)
            .unwrap();
        assert_eq!(insight.severity(), InsightSeverity::Critical);
    }

    #[test]
    fn evidence_is_deduplicated_in_order() {
        let blockers = vec![
            BlockerRecord::new(BlockerType::Resources, BlockerSeverity::Medium, "nunca llegaron"),
            BlockerRecord::new(BlockerType::Process, BlockerSeverity::Medium, "burocracia"),
            BlockerRecord::new(BlockerType::Resources, BlockerSeverity::Medium, "nunca llegaron"),
        ];
        assert_eq!(
            collect_evidence(&blockers),
            vec!["nunca llegaron".to_string(), "burocracia".to_string()]
        );
    }

    #[test]
    fn invalid_attempt_pattern_is_rejected() {
        let templates = InsightTemplates {
            attempt_pattern: "([".to_string(),
            ..InsightTemplates::default()
        };
        assert!(InsightGenerator::new(templates).is_err());
    }
}
