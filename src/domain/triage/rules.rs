//! Triage rules.
//!
//! Keyword sets, thresholds and question templates the agent and the blocker
//! detector are built from. Every table lives here, injected at construction,
//! so a tenant or locale can ship its own rules file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::blocker::BlockerType;
use crate::domain::foundation::ValidationError;

/// Question asked when no category or generic template is available.
pub const FALLBACK_QUESTION: &str = "¿Qué crees que está causando esta situación?";

/// Configuration for follow-up decisions and blocker detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageRules {
    /// Maximum employee replies before the conversation closes.
    pub max_turns: usize,
    /// Accumulated blockers that escalate risk to critical.
    pub critical_blocker_threshold: usize,
    /// Top categories that always trigger follow-up, whatever the stress.
    pub always_probe_categories: Vec<String>,
    /// Phrases that end the conversation on the employee's request.
    pub decline_phrases: Vec<String>,
    pub blockers: BlockerKeywords,
    pub questions: QuestionBank,
}

impl Default for TriageRules {
    fn default() -> Self {
        Self {
            max_turns: 3,
            critical_blocker_threshold: 3,
            always_probe_categories: strings(&[
                "conflicto",
                "conflictos interpersonales",
                "compensación",
                "salario",
                "acoso",
                "discriminación",
            ]),
            decline_phrases: strings(&[
                "no, gracias",
                "no gracias",
                "prefiero no decir",
                "prefiero no decirlo",
                "prefiero no hablar",
                "prefiero no comentar",
                "no quiero hablar",
                "no quiero seguir",
            ]),
            blockers: BlockerKeywords::default(),
            questions: QuestionBank::default(),
        }
    }
}

impl TriageRules {
    /// Parses rules from YAML; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        let rules: TriageRules = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("triage_rules", e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_turns == 0 || self.max_turns > 20 {
            return Err(ValidationError::out_of_range(
                "max_turns",
                1,
                20,
                self.max_turns as i64,
            ));
        }
        if self.critical_blocker_threshold == 0 {
            return Err(ValidationError::out_of_range(
                "critical_blocker_threshold",
                1,
                i64::MAX,
                0,
            ));
        }
        if self.blockers.priority.is_empty() {
            return Err(ValidationError::empty_field("blockers.prioridad"));
        }
        for blocker_type in BlockerType::PRIORITY {
            if self.blockers.phrases_for(blocker_type).is_empty() {
                return Err(ValidationError::empty_field(format!(
                    "blockers.{}",
                    blocker_type
                )));
            }
        }
        Ok(())
    }

    /// Returns true if the category is in the always-probe set.
    pub fn is_always_probe(&self, category: &str) -> bool {
        let category = category.trim().to_lowercase();
        !category.is_empty()
            && self
                .always_probe_categories
                .iter()
                .any(|c| c.to_lowercase() == category)
    }

    /// Returns the decline phrase the reply opens with, if any.
    ///
    /// The phrase must start the reply (after opening punctuation) and end on
    /// a word boundary, so "no quiero seguir" does not match "no quiero
    /// seguirte" nor a phrase buried mid-sentence.
    pub fn decline_phrase_in(&self, reply: &str) -> Option<&str> {
        let lower = reply.to_lowercase();
        let lower = lower
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '¡' | '¿' | '"' | '«'));
        self.decline_phrases
            .iter()
            .find(|phrase| {
                let phrase = phrase.trim().to_lowercase();
                !phrase.is_empty()
                    && lower.strip_prefix(phrase.as_str()).is_some_and(|rest| {
                        rest.chars().next().map_or(true, |c| !c.is_alphanumeric())
                    })
            })
            .map(String::as_str)
    }
}

/// Literal phrases per blocker category plus severity modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockerKeywords {
    #[serde(rename = "liderazgo")]
    pub leadership: Vec<String>,
    #[serde(rename = "recursos")]
    pub resources: Vec<String>,
    #[serde(rename = "proceso")]
    pub process: Vec<String>,
    #[serde(rename = "cultural")]
    pub cultural: Vec<String>,
    /// Words that raise severity to high ("nunca", "siempre").
    pub intensifiers: Vec<String>,
    /// Regular expression for explicit duration phrases ("llevo 2 meses").
    pub duration_pattern: String,
    /// Order in which categories are tried; the first match wins.
    #[serde(rename = "prioridad")]
    pub priority: Vec<BlockerType>,
}

impl Default for BlockerKeywords {
    fn default() -> Self {
        Self {
            leadership: strings(&[
                "nunca responde",
                "no responde",
                "no tiene tiempo",
                "nunca tiene tiempo",
                "me ignora",
                "nos ignora",
                "no me escucha",
                "no nos escucha",
                "no me hace caso",
                "nunca me hace caso",
                "no hay apoyo de mi jefe",
                "no da retroalimentación",
            ]),
            resources: strings(&[
                "prometieron",
                "nunca llegaron",
                "no llegaron",
                "no hay presupuesto",
                "sin presupuesto",
                "faltan herramientas",
                "no tenemos herramientas",
                "falta personal",
                "sin recursos",
                "no hay recursos",
            ]),
            process: strings(&[
                "burocracia",
                "mucho papeleo",
                "demasiado papeleo",
                "demasiadas aprobaciones",
                "demasiados pasos",
                "nadie sabe el proceso",
                "el proceso es lento",
                "trámites",
            ]),
            cultural: strings(&[
                "siempre ha sido así",
                "así es aquí",
                "así es siempre",
                "aquí es normal",
                "nadie dice nada",
                "nadie se queja",
                "así funciona esta empresa",
                "no va a cambiar",
            ]),
            intensifiers: strings(&[
                "nunca",
                "siempre",
                "jamás",
                "todo el tiempo",
                "cada vez",
                "constantemente",
            ]),
            duration_pattern: r"\b(llevo|llevamos|lleva|llevan|hace)\s+(\d+|un|una|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez|varios|varias|muchos|muchas)\s+(d[ií]as?|semanas?|mes|meses|a[ñn]os?)\b".to_string(),
            priority: BlockerType::PRIORITY.to_vec(),
        }
    }
}

impl BlockerKeywords {
    /// Returns the phrase set for a blocker category.
    pub fn phrases_for(&self, blocker_type: BlockerType) -> &[String] {
        match blocker_type {
            BlockerType::Leadership => &self.leadership,
            BlockerType::Resources => &self.resources,
            BlockerType::Process => &self.process,
            BlockerType::Cultural => &self.cultural,
        }
    }
}

/// Follow-up question templates.
///
/// The first question of a category is the opening question for
/// conversations on that category; the rest are follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionBank {
    pub by_category: BTreeMap<String, Vec<String>>,
    pub by_blocker: BTreeMap<BlockerType, Vec<String>>,
    pub generic: Vec<String>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        let mut by_category = BTreeMap::new();
        by_category.insert(
            "sobrecarga laboral".to_string(),
            strings(&[
                "¿Ya intentaste hablar con tu supervisor sobre esta carga de trabajo?",
                "¿Desde cuándo sientes que la carga de trabajo es excesiva?",
                "¿Qué tareas son las que más tiempo te consumen?",
            ]),
        );
        by_category.insert(
            "liderazgo".to_string(),
            strings(&[
                "¿Has podido comentar esta situación con tu líder directo?",
                "¿Cómo describirías la comunicación con tu supervisor?",
            ]),
        );
        by_category.insert(
            "recursos insuficientes".to_string(),
            strings(&[
                "¿Qué recursos o herramientas te hacen falta para hacer tu trabajo?",
                "¿Has solicitado esos recursos antes? ¿Qué respuesta recibiste?",
            ]),
        );
        by_category.insert(
            "comunicación".to_string(),
            strings(&[
                "¿Con quién o en qué situaciones se complica la comunicación?",
                "¿Existe algún espacio donde puedas plantear estos temas?",
            ]),
        );
        by_category.insert(
            "conflicto".to_string(),
            strings(&[
                "¿Podrías contarme un poco más sobre el conflicto que mencionas?",
                "¿Alguien más del equipo está al tanto de esta situación?",
            ]),
        );
        by_category.insert(
            "compensación".to_string(),
            strings(&[
                "¿Qué aspecto de tu compensación te preocupa más?",
                "¿Has tenido oportunidad de conversarlo con RRHH o con tu jefe?",
            ]),
        );

        let mut by_blocker = BTreeMap::new();
        by_blocker.insert(
            BlockerType::Leadership,
            strings(&[
                "¿Cuánto tiempo llevas intentando reunirte o hablar con tu supervisor?",
                "¿Hay alguien más en la organización con quien hayas podido escalarlo?",
            ]),
        );
        by_blocker.insert(
            BlockerType::Resources,
            strings(&[
                "¿Quién se comprometió a entregar esos recursos y cuándo?",
                "¿Cómo está afectando esa falta de recursos a tu trabajo diario?",
            ]),
        );
        by_blocker.insert(
            BlockerType::Process,
            strings(&[
                "¿Qué paso del proceso es el que más te frena?",
                "¿Has propuesto alguna mejora a ese proceso?",
            ]),
        );
        by_blocker.insert(
            BlockerType::Cultural,
            strings(&[
                "¿Qué crees que tendría que pasar para que esto cambie?",
                "¿Sientes que puedes expresar este tipo de problemas sin consecuencias?",
            ]),
        );

        Self {
            by_category,
            by_blocker,
            generic: strings(&[
                FALLBACK_QUESTION,
                "¿Cómo está afectando esta situación a tu bienestar o a tu trabajo?",
                "¿Qué cambio concreto te ayudaría más en este momento?",
            ]),
        }
    }
}

impl QuestionBank {
    /// Opening question for a conversation on the given category.
    pub fn opening_question(&self, category: &str) -> &str {
        self.category_questions(category)
            .first()
            .or_else(|| self.generic.first())
            .map(String::as_str)
            .unwrap_or(FALLBACK_QUESTION)
    }

    /// Questions registered for a category (case-insensitive).
    pub fn category_questions(&self, category: &str) -> &[String] {
        let key = category.trim().to_lowercase();
        self.by_category
            .iter()
            .find(|(k, _)| k.to_lowercase() == key)
            .map(|(_, questions)| questions.as_slice())
            .unwrap_or(&[])
    }

    /// Questions specific to a blocker type.
    pub fn blocker_questions(&self, blocker_type: BlockerType) -> &[String] {
        self.by_blocker
            .get(&blocker_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
