//! Insight text templates and classification markers.
//!
//! Placeholders available in titles and recommendations:
//! `{categoria}`, `{bloqueo}`, `{departamento}`, `{equipo}`, `{area}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::status::{InsightSeverity, InsightType};
use crate::domain::foundation::ValidationError;

/// Configuration for insight classification and wording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightTemplates {
    /// Phrases in blocker evidence meaning the employee already tried.
    pub attempt_markers: Vec<String>,
    /// Regular expression for "llevo ... intentando" style attempts.
    pub attempt_pattern: String,
    /// Phrases meaning the problem is happening again.
    pub recurrence_markers: Vec<String>,
    /// Title per insight type.
    pub titles: BTreeMap<InsightType, String>,
    /// Titles for specific `(tipo, categoria)` pairs.
    pub title_overrides: Vec<TitleOverride>,
    pub recommendations: Vec<RecommendationTemplate>,
}

/// Title for one `(tipo, categoria)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleOverride {
    #[serde(rename = "tipo")]
    pub insight_type: InsightType,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "titulo")]
    pub title: String,
}

/// HR recommendation for one `(tipo, severidad)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTemplate {
    #[serde(rename = "tipo")]
    pub insight_type: InsightType,
    #[serde(rename = "severidad")]
    pub severity: InsightSeverity,
    #[serde(rename = "texto")]
    pub text: String,
}

/// Values substituted into templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars<'a> {
    pub category: &'a str,
    pub blocker: &'a str,
    pub department: &'a str,
    pub team: &'a str,
}

impl TemplateVars<'_> {
    /// `departamento - equipo`, whichever are present.
    pub fn area(&self) -> String {
        let parts: Vec<&str> = [self.department, self.team]
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            "la organización".to_string()
        } else {
            parts.join(" - ")
        }
    }

    /// Replaces every known placeholder in `template`.
    pub fn render(&self, template: &str) -> String {
        let department = or_default(self.department, "el departamento");
        let team = or_default(self.team, "el equipo");
        template
            .replace("{categoria}", or_default(self.category, "general"))
            .replace("{bloqueo}", self.blocker)
            .replace("{departamento}", department)
            .replace("{equipo}", team)
            .replace("{area}", &self.area())
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

impl Default for InsightTemplates {
    fn default() -> Self {
        use InsightSeverity::*;
        use InsightType::*;

        let mut titles = BTreeMap::new();
        titles.insert(OrganizationalBlocker, "Bloqueo organizacional en {categoria}".to_string());
        titles.insert(PersistentProblem, "Problema persistente en {categoria}".to_string());
        titles.insert(FailedAction, "Intentos fallidos de resolver {categoria}".to_string());

        let title_overrides = vec![
            title(OrganizationalBlocker, "sobrecarga laboral", "Sobrecarga laboral bloqueada por {bloqueo}"),
            title(PersistentProblem, "sobrecarga laboral", "Sobrecarga laboral recurrente en {area}"),
            title(FailedAction, "sobrecarga laboral", "Sobrecarga laboral sin respuesta pese a intentos del empleado"),
            title(OrganizationalBlocker, "liderazgo", "Liderazgo inaccesible en {area}"),
            title(FailedAction, "liderazgo", "Intentos de contacto con el liderazgo sin respuesta"),
            title(OrganizationalBlocker, "recursos insuficientes", "Recursos comprometidos que no llegan a {area}"),
            title(OrganizationalBlocker, "comunicación", "Canales de comunicación bloqueados en {area}"),
        ];

        let recommendations = vec![
            rec(OrganizationalBlocker, Low, "Registrar el bloqueo de {bloqueo} y revisarlo en la próxima reunión de seguimiento con {departamento}."),
            rec(OrganizationalBlocker, Medium, "Agendar una conversación con la jefatura de {departamento} para revisar el bloqueo de {bloqueo} reportado en {categoria}."),
            rec(OrganizationalBlocker, High, "Intervenir esta semana con la jefatura de {departamento} y {equipo}: el bloqueo de {bloqueo} está afectando el bienestar en {area}."),
            rec(OrganizationalBlocker, Critical, "Escalar de inmediato a la dirección: bloqueo crítico de {bloqueo} en {area}. Contactar al colaborador en las próximas 48 horas."),
            rec(PersistentProblem, Low, "Monitorear la recurrencia de {categoria} en {area} en los próximos ciclos de feedback."),
            rec(PersistentProblem, Medium, "Revisar con {departamento} el historial de {categoria}: el problema se repite y requiere un plan de acción."),
            rec(PersistentProblem, High, "Definir un plan de acción con responsables y plazos para el problema recurrente de {categoria} en {area}."),
            rec(PersistentProblem, Critical, "Escalar a la dirección el problema recurrente de {categoria} en {area} y activar seguimiento semanal con {equipo}."),
            rec(FailedAction, Low, "Reconocer los intentos del colaborador y acordar con {departamento} un canal claro para {categoria}."),
            rec(FailedAction, Medium, "Mediar entre el colaborador y la jefatura de {departamento}: hubo intentos previos sin respuesta sobre {categoria}."),
            rec(FailedAction, High, "Asignar un responsable de RRHH para acompañar al colaborador de {equipo}; sus intentos por resolver {categoria} no han tenido respuesta."),
            rec(FailedAction, Critical, "Intervención urgente de RRHH en {area}: intentos reiterados sin respuesta y riesgo crítico para el colaborador."),
        ];

        Self {
            attempt_markers: [
                "intenté",
                "intente",
                "he intentado",
                "hemos intentado",
                "intentamos",
                "traté de",
                "he tratado",
                "pedí",
                "he pedido",
                "solicité",
                "he solicitado",
                "ya lo hablé",
                "ya le dije",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            attempt_pattern: r"\bllev(o|amos|a|an)\b.*\bintentando\b".to_string(),
            recurrence_markers: [
                "otra vez",
                "de nuevo",
                "nuevamente",
                "una y otra vez",
                "sigue pasando",
                "vuelve a pasar",
                "volvió a pasar",
                "como siempre",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            titles,
            title_overrides,
            recommendations,
        }
    }
}

impl InsightTemplates {
    /// Parses templates from YAML; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("insight_templates", e.to_string()))
    }

    /// Title template for `(tipo, categoria)`, falling back to the per-type
    /// title.
    pub fn title_for(&self, insight_type: InsightType, category: &str) -> Option<&str> {
        let category = category.trim().to_lowercase();
        self.title_overrides
            .iter()
            .find(|o| o.insight_type == insight_type && o.category.to_lowercase() == category)
            .map(|o| o.title.as_str())
            .or_else(|| self.titles.get(&insight_type).map(String::as_str))
    }

    pub fn recommendation_for(
        &self,
        insight_type: InsightType,
        severity: InsightSeverity,
    ) -> Option<&str> {
        self.recommendations
            .iter()
            .find(|r| r.insight_type == insight_type && r.severity == severity)
            .map(|r| r.text.as_str())
    }
}

fn title(insight_type: InsightType, category: &str, text: &str) -> TitleOverride {
    TitleOverride {
        insight_type,
        category: category.to_string(),
        title: text.to_string(),
    }
}

fn rec(insight_type: InsightType, severity: InsightSeverity, text: &str) -> RecommendationTemplate {
    RecommendationTemplate {
        insight_type,
        severity,
        text: text.to_string(),
    }
}
