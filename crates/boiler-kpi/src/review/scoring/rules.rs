use super::super::domain::{EvaluationState, KpiCategory, KpiItem, RatingLevel, Rubric};
use super::{CategoryBreakdown, CategoryPoints, Ranking, ScoreSummary, ScoringError};

/// Round half away from zero to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `points` over `max_points` with 2-decimal precision,
/// guarded against an empty maximum.
pub(crate) fn percent_of(points: f64, max_points: f64) -> f64 {
    if max_points > 0.0 {
        ((points / max_points) * 10_000.0).round() / 100.0
    } else {
        0.0
    }
}

pub(crate) fn item_score(item: &KpiItem, level: RatingLevel) -> Result<f64, ScoringError> {
    let criterion = item
        .criteria
        .get(&level)
        .ok_or_else(|| ScoringError::MissingCriterion {
            item_id: item.id.clone(),
            level,
        })?;
    Ok(round2(item.max_points * criterion.score_percent))
}

/// Category subtotal. An item with no recorded rating contributes 0 points;
/// the maximum always counts every item.
pub(crate) fn category_points(
    category: &KpiCategory,
    state: &EvaluationState,
) -> Result<CategoryPoints, ScoringError> {
    let mut points = 0.0;
    let mut max_points = 0.0;

    for item in &category.items {
        max_points += item.max_points;
        if let Some(rating) = state.get(&item.id) {
            points += item_score(item, rating.level)?;
        }
    }

    Ok(CategoryPoints {
        points: round2(points),
        max_points,
    })
}

pub(crate) fn total_score(
    rubric: &Rubric,
    state: &EvaluationState,
) -> Result<ScoreSummary, ScoringError> {
    let mut total_points = 0.0;
    let mut total_max = 0.0;
    let mut breakdown = Vec::with_capacity(rubric.categories.len());

    for category in &rubric.categories {
        let category_result = category_points(category, state)?;
        breakdown.push(CategoryBreakdown {
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            points: category_result.points,
            max_points: category_result.max_points,
        });
        total_points += category_result.points;
        total_max += category_result.max_points;
    }

    let total_points = round2(total_points);
    let percent = percent_of(total_points, total_max);

    Ok(ScoreSummary {
        total_points,
        total_max,
        percent,
        ranking: Ranking::from_percent(percent),
        breakdown,
    })
}
