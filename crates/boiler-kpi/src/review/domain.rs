use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discrete rating tier a reviewer assigns to a KPI item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RatingLevel {
    Good,
    Average,
    Weak,
}

impl RatingLevel {
    pub const ALL: [RatingLevel; 3] = [RatingLevel::Good, RatingLevel::Average, RatingLevel::Weak];

    pub const fn label(self) -> &'static str {
        match self {
            RatingLevel::Good => "Tốt",
            RatingLevel::Average => "Trung bình",
            RatingLevel::Weak => "Yếu",
        }
    }
}

/// What a rating tier means for one item and the fraction of its points it awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub label: String,
    pub description: String,
    /// Fraction of the item's `max_points`, in `[0, 1]`.
    pub score_percent: f64,
}

/// One weighted line of the rubric.
///
/// `criteria` is keyed by rating level; a well-formed rubric carries all three
/// levels for every item, enforced by [`crate::review::validate::validate`] at
/// load time rather than per scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiItem {
    pub id: String,
    pub code: String,
    pub name: String,
    pub max_points: f64,
    pub checklist: Vec<String>,
    pub criteria: BTreeMap<RatingLevel, Criterion>,
}

/// Ordered group of rubric items scored and reported together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<KpiItem>,
}

/// The full rubric: an ordered sequence of categories, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub categories: Vec<KpiCategory>,
}

impl Rubric {
    pub fn new(categories: Vec<KpiCategory>) -> Self {
        Self { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn find_item(&self, item_id: &str) -> Option<&KpiItem> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter())
            .find(|item| item.id == item_id)
    }

    pub fn item_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.items.len())
            .sum()
    }
}

/// Recorded rating for one item within an evaluation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRating {
    pub level: RatingLevel,
    pub actual_score: f64,
    #[serde(default)]
    pub notes: String,
}

/// Sparse per-item ratings for one evaluation session.
///
/// An item absent from the map is "not yet rated". Entries are created or
/// overwritten the moment a rating is chosen; notes can be edited without
/// touching the level. The whole state is dropped on session reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationState {
    entries: BTreeMap<String, ItemRating>,
}

impl EvaluationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the rating for an item, preserving any prior notes.
    pub fn rate(&mut self, item_id: &str, level: RatingLevel, actual_score: f64) {
        let notes = self
            .entries
            .get(item_id)
            .map(|entry| entry.notes.clone())
            .unwrap_or_default();
        self.entries.insert(
            item_id.to_string(),
            ItemRating {
                level,
                actual_score,
                notes,
            },
        );
    }

    /// Update the notes on an already-rated item. Returns `false` when the
    /// item has no rating to annotate.
    pub fn set_note(&mut self, item_id: &str, note: &str) -> bool {
        match self.entries.get_mut(item_id) {
            Some(entry) => {
                entry.notes = note.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemRating> {
        self.entries.get(item_id)
    }

    pub fn is_rated(&self, item_id: &str) -> bool {
        self.entries.contains_key(item_id)
    }

    pub fn rated_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemRating)> {
        self.entries
            .iter()
            .map(|(item_id, rating)| (item_id.as_str(), rating))
    }
}

/// Report metadata for the person under review. Plain strings, no invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub name: String,
    pub id: String,
    pub position: String,
    pub department: String,
    pub report_date: NaiveDate,
}
