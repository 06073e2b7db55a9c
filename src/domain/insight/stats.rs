//! Aggregate counts over a set of insights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::insight::Insight;

/// Totals by status, severity, type and department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightStats {
    pub total: usize,
    #[serde(rename = "por_estado")]
    pub by_status: BTreeMap<String, usize>,
    #[serde(rename = "por_severidad")]
    pub by_severity: BTreeMap<String, usize>,
    #[serde(rename = "por_tipo")]
    pub by_type: BTreeMap<String, usize>,
    #[serde(rename = "por_departamento")]
    pub by_department: BTreeMap<String, usize>,
}

impl InsightStats {
    /// Insights without a department are counted under `sin_departamento`.
    pub fn from_insights<'a>(insights: impl IntoIterator<Item = &'a Insight>) -> Self {
        let mut stats = Self::default();
        for insight in insights {
            stats.total += 1;
            bump(&mut stats.by_status, insight.status().as_str());
            bump(&mut stats.by_severity, insight.severity().as_str());
            bump(&mut stats.by_type, insight.insight_type().as_str());
            let department = match insight.department().trim() {
                "" => "sin_departamento",
                d => d,
            };
            bump(&mut stats.by_department, department);
        }
        stats
    }
}

fn bump(counts: &mut BTreeMap<String, usize>, key: &str) {
    *counts.entry(key.to_string()).or_default() += 1;
}
