//! Pre-flight rubric diagnostics.
//!
//! Collects every structural defect instead of failing on the first one; the
//! caller decides whether to block. An empty result means the rubric is
//! well-formed and the scoring engine's missing-criterion error can never
//! fire.

use super::domain::{RatingLevel, Rubric};

/// Structural violation found in a rubric definition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RubricDefect {
    #[error("rubric must contain at least one category")]
    EmptyRubric,
    #[error("category at position {index} is missing an id or name")]
    CategoryMissingIdentity { index: usize },
    #[error("category {category_id} has no items")]
    EmptyCategory { category_id: String },
    #[error("category {category_id} item at position {index} is missing id, code, or name")]
    ItemMissingIdentity { category_id: String, index: usize },
    #[error("item {item_id} must have strictly positive max_points (got {max_points})")]
    NonPositiveMaxPoints { item_id: String, max_points: f64 },
    #[error("item {item_id} is missing criteria for {missing:?}")]
    MissingCriteria {
        item_id: String,
        missing: Vec<RatingLevel>,
    },
    #[error("item {item_id} {level:?} score_percent {score_percent} is outside [0, 1]")]
    ScorePercentOutOfRange {
        item_id: String,
        level: RatingLevel,
        score_percent: f64,
    },
}

pub fn validate(rubric: &Rubric) -> Vec<RubricDefect> {
    let mut defects = Vec::new();

    if rubric.is_empty() {
        defects.push(RubricDefect::EmptyRubric);
        return defects;
    }

    for (category_index, category) in rubric.categories.iter().enumerate() {
        if category.id.is_empty() || category.name.is_empty() {
            defects.push(RubricDefect::CategoryMissingIdentity {
                index: category_index,
            });
        }
        if category.items.is_empty() {
            defects.push(RubricDefect::EmptyCategory {
                category_id: category.id.clone(),
            });
        }

        for (item_index, item) in category.items.iter().enumerate() {
            if item.id.is_empty() || item.code.is_empty() || item.name.is_empty() {
                defects.push(RubricDefect::ItemMissingIdentity {
                    category_id: category.id.clone(),
                    index: item_index,
                });
            }
            if !(item.max_points > 0.0) {
                defects.push(RubricDefect::NonPositiveMaxPoints {
                    item_id: item.id.clone(),
                    max_points: item.max_points,
                });
            }

            let missing: Vec<RatingLevel> = RatingLevel::ALL
                .into_iter()
                .filter(|level| !item.criteria.contains_key(level))
                .collect();
            if !missing.is_empty() {
                defects.push(RubricDefect::MissingCriteria {
                    item_id: item.id.clone(),
                    missing,
                });
            }

            for (level, criterion) in &item.criteria {
                if !(0.0..=1.0).contains(&criterion.score_percent) {
                    defects.push(RubricDefect::ScorePercentOutOfRange {
                        item_id: item.id.clone(),
                        level: *level,
                        score_percent: criterion.score_percent,
                    });
                }
            }
        }
    }

    defects
}
