mod policy;
mod rules;

pub use policy::Ranking;

use serde::{Deserialize, Serialize};

use super::catalog;
use super::domain::{EvaluationState, KpiItem, RatingLevel, Rubric};

/// Points one item earns at the given level, rounded to 2 decimals.
///
/// Fails only when the item's criteria map lacks the level, which load-time
/// validation rules out for well-formed rubrics.
pub fn item_score(item: &KpiItem, level: RatingLevel) -> Result<f64, ScoringError> {
    rules::item_score(item, level)
}

/// Stateless engine applying the rubric to one evaluation's sparse ratings.
///
/// Every computation is pure and synchronous; callers recompute on each state
/// change rather than caching.
pub struct ScoringEngine {
    rubric: Rubric,
}

impl ScoringEngine {
    pub fn new(rubric: Rubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Points one item earns at the given level, rounded to 2 decimals.
    pub fn item_score(&self, item: &KpiItem, level: RatingLevel) -> Result<f64, ScoringError> {
        item_score(item, level)
    }

    /// Total, percentage, ranking, and per-category breakdown in rubric order.
    pub fn summarize(&self, state: &EvaluationState) -> Result<ScoreSummary, ScoringError> {
        rules::total_score(&self.rubric, state)
    }

    /// Per-category display rows (short names, category percentages).
    pub fn category_results(
        &self,
        state: &EvaluationState,
    ) -> Result<Vec<CategoryScoreResult>, ScoringError> {
        self.rubric
            .categories
            .iter()
            .map(|category| {
                let points = rules::category_points(category, state)?;
                Ok(CategoryScoreResult {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    short_name: catalog::short_name(&category.id, &category.name),
                    score: points.points,
                    max: points.max_points,
                    percentage: rules::percent_of(points.points, points.max_points),
                })
            })
            .collect()
    }
}

/// Scoring failure. Only raised for rubrics that skipped load-time validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("criterion {level:?} not found for item {item_id}")]
    MissingCriterion { item_id: String, level: RatingLevel },
}

/// Points and maximum for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryPoints {
    pub points: f64,
    pub max_points: f64,
}

/// One breakdown line of a total-score summary, in rubric order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category_id: String,
    pub category_name: String,
    pub points: f64,
    pub max_points: f64,
}

/// Aggregate outcome of scoring one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total_points: f64,
    pub total_max: f64,
    pub percent: f64,
    pub ranking: Ranking,
    pub breakdown: Vec<CategoryBreakdown>,
}

/// Derived per-category display row; recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScoreResult {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub score: f64,
    pub max: f64,
    pub percentage: f64,
}
