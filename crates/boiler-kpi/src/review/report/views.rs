use serde::Serialize;

use super::super::domain::{EmployeeInfo, RatingLevel};
use super::super::scoring::{CategoryScoreResult, Ranking};

/// One rubric item in the printable breakdown. Unrated items carry no level
/// and score 0.
#[derive(Debug, Clone, Serialize)]
pub struct ItemScoreView {
    pub id: String,
    pub code: String,
    pub name: String,
    pub max_points: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<RatingLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_label: Option<&'static str>,
    pub score: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// Serializable report payload for the HTTP layer and CLI JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReportView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub total_points: f64,
    pub total_max: f64,
    pub percent: f64,
    pub ranking: Ranking,
    pub ranking_label: &'static str,
    pub categories: Vec<CategoryScoreResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemScoreView>,
}
