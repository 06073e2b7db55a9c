//! Keyword Feedback Analyzer
//!
//! Deterministic stand-in for the NLP models: stress, emotion and
//! categories come from keyword tables, the summary is the (truncated)
//! comment, and the suggestion follows fixed rules per stress level.
//! Used by the demo binary and tests.

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::feedback::{
    CategoryScore, EmotionScore, InitialAnalysis, SentimentDistribution, StressAssessment,
    StressLevel,
};
use crate::domain::triage::MIN_INFORMATIVE_CHARS;
use crate::ports::{AnalysisError, FeedbackAnalyzer};

/// Longest summary kept verbatim.
const MAX_SUMMARY_CHARS: usize = 140;

const STRESS_WORDS: &[&str] = &["estresado", "estresada", "agotado", "agotada", "presión", "burnout", "sobrecarga"];

struct EmotionRule {
    words: &'static [&'static str],
    label: &'static str,
    score: f64,
    sentiment: SentimentDistribution,
}

static EMOTION_RULES: Lazy<Vec<EmotionRule>> = Lazy::new(|| {
    vec![
        EmotionRule {
            words: &["feliz", "contento", "contenta", "alegre", "gusta", "encanta"],
            label: "alegría",
            score: 0.85,
            sentiment: SentimentDistribution::new(0.8, 0.15, 0.05),
        },
        EmotionRule {
            words: &["triste", "mal", "deprimido", "deprimida"],
            label: "tristeza",
            score: 0.85,
            sentiment: SentimentDistribution::new(0.1, 0.2, 0.7),
        },
        EmotionRule {
            words: &["enojado", "enojada", "furioso", "furiosa", "molesto", "molesta"],
            label: "enojo",
            score: 0.85,
            sentiment: SentimentDistribution::new(0.1, 0.2, 0.7),
        },
    ]
});

const CATEGORY_RULES: &[(&str, f64, &[&str])] = &[
    ("sobrecarga laboral", 0.92, &["trabajo", "carga", "tareas", "proyecto"]),
    ("liderazgo", 0.88, &["jefe", "supervisor", "líder", "manager"]),
    ("recursos insuficientes", 0.85, &["recursos", "herramientas", "equipo", "sistema"]),
    ("comunicación", 0.80, &["comunicación", "hablar", "decir"]),
    ("conflicto", 0.78, &["conflicto", "pelea", "discusión"]),
    ("compensación", 0.75, &["salario", "sueldo", "pago", "bono"]),
];

/// Heuristic `FeedbackAnalyzer`.
#[derive(Debug, Clone, Default)]
pub struct KeywordFeedbackAnalyzer;

impl KeywordFeedbackAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous analysis; never fails.
    pub fn analyze_text(&self, text: &str) -> InitialAnalysis {
        let text = text.trim();
        if text.chars().count() < MIN_INFORMATIVE_CHARS {
            return InitialAnalysis::non_informative();
        }
        let lower = text.to_lowercase();

        let (emotion, sentiment) = detect_emotion(&lower);
        let stress = if contains_any(&lower, STRESS_WORDS) {
            StressLevel::High
        } else if emotion.label == "alegría" {
            StressLevel::Low
        } else {
            StressLevel::Medium
        };

        let categories = detect_categories(&lower);
        let labels: Vec<&str> = categories.iter().map(|c| c.label.as_str()).collect();
        let suggestion = suggestion_for(stress, &emotion.label, &labels, &lower);

        InitialAnalysis {
            emotion,
            stress: StressAssessment::new(stress, sentiment),
            categories,
            summary: summarize(text),
            suggestion: suggestion.to_string(),
        }
    }
}

#[async_trait]
impl FeedbackAnalyzer for KeywordFeedbackAnalyzer {
    async fn analyze(&self, text: &str) -> Result<InitialAnalysis, AnalysisError> {
        Ok(self.analyze_text(text))
    }
}

fn contains_any(lower: &str, words: &[&str]) -> bool {
    words.iter().any(|w| lower.contains(w))
}

fn detect_emotion(lower: &str) -> (EmotionScore, SentimentDistribution) {
    EMOTION_RULES
        .iter()
        .find(|rule| contains_any(lower, rule.words))
        .map(|rule| (EmotionScore::new(rule.label, rule.score), rule.sentiment))
        .unwrap_or_else(|| {
            (
                EmotionScore::new("tristeza", 0.75),
                SentimentDistribution::new(0.2, 0.3, 0.5),
            )
        })
}

fn detect_categories(lower: &str) -> Vec<CategoryScore> {
    let mut categories: Vec<CategoryScore> = CATEGORY_RULES
        .iter()
        .filter(|(_, _, words)| contains_any(lower, words))
        .map(|(label, score, _)| CategoryScore::new(*label, *score))
        .collect();
    if categories.is_empty() {
        categories.push(CategoryScore::new("satisfacción general", 0.60));
    }
    categories
}

fn summarize(text: &str) -> String {
    if text.chars().count() <= MAX_SUMMARY_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(MAX_SUMMARY_CHARS).collect();
    format!("{}...", truncated.trim_end())
}

fn suggestion_for(stress: StressLevel, emotion: &str, categories: &[&str], lower: &str) -> &'static str {
    let workload = contains_any(lower, &["carga", "presión", "estresado", "mucho trabajo", "agotado", "plazos"]);
    let resources = contains_any(lower, &["recursos", "herramientas", "sistema", "equipo", "materiales"]);
    let boss = contains_any(lower, &["jefe", "supervisor", "líder", "manager", "gerente"]);
    let communication = lower.contains("comunicación");
    let conflict = contains_any(lower, &["conflicto", "pelea", "problema", "discusión"]);
    let time = contains_any(lower, &["tiempo", "horas", "horario"]);

    match stress {
        StressLevel::High => {
            if workload || categories.contains(&"sobrecarga laboral") {
                "Se recomienda una reunión inmediata para revisar la carga laboral, redistribuir tareas y ajustar plazos."
            } else if resources || categories.contains(&"recursos insuficientes") {
                "Revisar disponibilidad de herramientas o personal. Evaluar apoyo temporal o reasignación de recursos."
            } else if boss {
                "Sugerencia: reunión con el supervisor para revisar expectativas y mejorar comunicación."
            } else if conflict {
                "Se recomienda una intervención de RRHH para resolver conflictos internos."
            } else if matches!(emotion, "miedo" | "tristeza") {
                "Se sugiere acompañamiento emocional y seguimiento cercano del caso."
            } else {
                "Plan de acción urgente: reunión 1:1, revisión de causas de estrés y seguimiento semanal."
            }
        }
        StressLevel::Medium => {
            if communication {
                "Mejorar canales de comunicación. Establecer reuniones periódicas para evitar malentendidos."
            } else if time {
                "Revisar distribución del tiempo y prioridades. Posible capacitación en gestión del tiempo."
            } else if resources {
                "Analizar si existen recursos suficientes para realizar el trabajo adecuadamente."
            } else {
                "Monitoreo recomendado para evitar escalamiento a alto estrés."
            }
        }
        StressLevel::Low => {
            if matches!(emotion, "alegría" | "sorpresa") {
                "El empleado muestra señales positivas. Reforzar prácticas actuales."
            } else if categories.contains(&"motivación") {
                "El empleado está motivado. Considerar nuevos retos o proyectos de crecimiento."
            } else {
                "Situación estable. Mantener comunicación abierta."
            }
        }
    }
}
