//! Insight listing filter.

use serde::{Deserialize, Serialize};

use super::insight::Insight;
use super::status::{InsightSeverity, InsightStatus, InsightType};

/// Conjunction of optional criteria. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightFilter {
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub insight_type: Option<InsightType>,
    #[serde(rename = "severidad", skip_serializing_if = "Option::is_none")]
    pub severity: Option<InsightSeverity>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<InsightStatus>,
    #[serde(rename = "departamento", skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Maximum number of results.
    #[serde(rename = "limite", skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl InsightFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, insight_type: InsightType) -> Self {
        self.insight_type = Some(insight_type);
        self
    }

    pub fn with_severity(mut self, severity: InsightSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_status(mut self, status: InsightStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, insight: &Insight) -> bool {
        self.insight_type.map_or(true, |t| insight.insight_type() == t)
            && self.severity.map_or(true, |s| insight.severity() == s)
            && self.status.map_or(true, |s| insight.status() == s)
            && self
                .department
                .as_deref()
                .map_or(true, |d| insight.department() == d)
    }

    /// Keeps matching insights, newest first (ties broken by id), truncated
    /// to the limit.
    pub fn apply<I>(&self, insights: I) -> Vec<Insight>
    where
        I: IntoIterator<Item = Insight>,
    {
        let mut selected: Vec<Insight> = insights.into_iter().filter(|i| self.matches(i)).collect();
        selected.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}
