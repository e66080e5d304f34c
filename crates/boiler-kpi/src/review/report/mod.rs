//! Report assembly: turns computed scores into display rows and the plain
//! text summary. Formatting only, no score arithmetic.

pub mod views;

pub use views::{ItemScoreView, ReviewReportView};

use super::domain::{EmployeeInfo, EvaluationState};
use super::scoring::{CategoryScoreResult, ScoreSummary, ScoringEngine, ScoringError};

/// Fully computed review: the aggregate summary, per-category display rows,
/// and per-item rows for the printable breakdown.
#[derive(Debug, Clone)]
pub struct ReviewReport {
    pub summary: ScoreSummary,
    pub categories: Vec<CategoryScoreResult>,
    pub items: Vec<ItemScoreView>,
}

impl ReviewReport {
    pub fn build(engine: &ScoringEngine, state: &EvaluationState) -> Result<Self, ScoringError> {
        let summary = engine.summarize(state)?;
        let categories = engine.category_results(state)?;

        let mut items = Vec::with_capacity(engine.rubric().item_count());
        for category in &engine.rubric().categories {
            for item in &category.items {
                let rating = state.get(&item.id);
                items.push(ItemScoreView {
                    id: item.id.clone(),
                    code: item.code.clone(),
                    name: item.name.clone(),
                    max_points: item.max_points,
                    level: rating.map(|entry| entry.level),
                    level_label: rating.map(|entry| entry.level.label()),
                    score: rating.map(|entry| entry.actual_score).unwrap_or(0.0),
                    notes: rating
                        .map(|entry| entry.notes.clone())
                        .unwrap_or_default(),
                });
            }
        }

        Ok(Self {
            summary,
            categories,
            items,
        })
    }

    pub fn text(&self) -> String {
        text_report(&self.summary)
    }

    pub fn view(
        &self,
        employee: Option<&EmployeeInfo>,
        period: Option<&str>,
        include_items: bool,
    ) -> ReviewReportView {
        ReviewReportView {
            employee: employee.cloned(),
            period: period.map(str::to_string),
            total_points: self.summary.total_points,
            total_max: self.summary.total_max,
            percent: self.summary.percent,
            ranking: self.summary.ranking,
            ranking_label: self.summary.ranking.label(),
            categories: self.categories.clone(),
            items: if include_items {
                self.items.clone()
            } else {
                Vec::new()
            },
        }
    }
}

/// Multi-line text summary: the total line, then one line per category in
/// rubric order.
pub fn text_report(summary: &ScoreSummary) -> String {
    let mut lines = Vec::with_capacity(summary.breakdown.len() + 2);
    lines.push(format!(
        "Tổng điểm: {}/{} ({}%)",
        summary.total_points, summary.total_max, summary.percent
    ));
    lines.push("Phân tích theo mục:".to_string());
    for entry in &summary.breakdown {
        lines.push(format!(
            "- {}: {}/{}",
            entry.category_name, entry.points, entry.max_points
        ));
    }
    lines.join("\n")
}
