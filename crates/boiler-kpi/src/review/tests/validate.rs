use super::common::*;
use crate::review::catalog;
use crate::review::domain::{KpiCategory, RatingLevel, Rubric};
use crate::review::validate::{validate, RubricDefect};

#[test]
fn shipped_rubric_is_well_formed() {
    let defects = validate(&catalog::boiler_shift_manager());
    assert!(defects.is_empty(), "unexpected defects: {defects:?}");
}

#[test]
fn empty_rubric_short_circuits() {
    let defects = validate(&Rubric::new(Vec::new()));
    assert_eq!(defects, vec![RubricDefect::EmptyRubric]);
}

#[test]
fn collects_every_structural_defect_instead_of_failing_fast() {
    let mut bad_item = rubric_item("", 0.0, 1.0, 0.7, 0.0);
    bad_item.criteria.remove(&RatingLevel::Weak);

    let rubric = Rubric::new(vec![
        KpiCategory {
            id: String::new(),
            name: String::new(),
            items: Vec::new(),
        },
        KpiCategory {
            id: "cat_2".to_string(),
            name: "2. AN TOÀN".to_string(),
            items: vec![bad_item],
        },
    ]);

    let defects = validate(&rubric);
    assert!(defects.contains(&RubricDefect::CategoryMissingIdentity { index: 0 }));
    assert!(defects.contains(&RubricDefect::EmptyCategory {
        category_id: String::new(),
    }));
    assert!(defects.contains(&RubricDefect::ItemMissingIdentity {
        category_id: "cat_2".to_string(),
        index: 0,
    }));
    assert!(defects.contains(&RubricDefect::NonPositiveMaxPoints {
        item_id: String::new(),
        max_points: 0.0,
    }));
    assert!(defects.contains(&RubricDefect::MissingCriteria {
        item_id: String::new(),
        missing: vec![RatingLevel::Weak],
    }));
}

#[test]
fn flags_score_fractions_outside_the_unit_interval() {
    let rubric = Rubric::new(vec![KpiCategory {
        id: "cat_1".to_string(),
        name: "1. VẬN HÀNH".to_string(),
        items: vec![rubric_item("1.1", 10.0, 1.2, 0.7, -0.1)],
    }]);

    let defects = validate(&rubric);
    assert_eq!(defects.len(), 2);
    assert!(defects.contains(&RubricDefect::ScorePercentOutOfRange {
        item_id: "1.1".to_string(),
        level: RatingLevel::Good,
        score_percent: 1.2,
    }));
    assert!(defects.contains(&RubricDefect::ScorePercentOutOfRange {
        item_id: "1.1".to_string(),
        level: RatingLevel::Weak,
        score_percent: -0.1,
    }));
}

#[test]
fn defects_render_as_human_readable_messages() {
    let message = RubricDefect::NonPositiveMaxPoints {
        item_id: "1.1".to_string(),
        max_points: -3.0,
    }
    .to_string();
    assert!(message.contains("1.1"));
    assert!(message.contains("-3"));
}
