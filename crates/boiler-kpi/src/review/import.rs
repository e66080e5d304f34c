//! Hydrates an evaluation from a ratings CSV export.
//!
//! Expected columns: `Item`, `Rating`, and an optional `Notes`. Rating tokens
//! are matched case-insensitively in English (`good`/`average`/`weak`) or
//! Vietnamese (`tốt`/`trung bình`/`yếu`). Later rows overwrite earlier ones.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{EvaluationState, RatingLevel, Rubric};
use super::scoring::{self, ScoringError};

#[derive(Debug, thiserror::Error)]
pub enum RatingsImportError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read ratings csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown KPI item '{item}'")]
    UnknownItem { row: usize, item: String },
    #[error("row {row}: unrecognized rating '{value}'")]
    UnknownRating { row: usize, value: String },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

pub struct RatingsCsvImporter;

impl RatingsCsvImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
        rubric: &Rubric,
    ) -> Result<EvaluationState, RatingsImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RatingsImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file, rubric)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        rubric: &Rubric,
    ) -> Result<EvaluationState, RatingsImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut state = EvaluationState::new();
        // Header occupies line 1, so data rows are numbered from 2.
        for (index, record) in csv_reader.deserialize::<RatingRow>().enumerate() {
            let row = index + 2;
            let record = record?;

            let item = rubric.find_item(&record.item).ok_or_else(|| {
                RatingsImportError::UnknownItem {
                    row,
                    item: record.item.clone(),
                }
            })?;
            let level =
                parse_level(&record.rating).ok_or_else(|| RatingsImportError::UnknownRating {
                    row,
                    value: record.rating.clone(),
                })?;

            let actual_score = scoring::item_score(item, level)?;
            state.rate(&item.id, level, actual_score);
            if let Some(notes) = &record.notes {
                state.set_note(&item.id, notes);
            }
        }

        Ok(state)
    }
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

fn parse_level(value: &str) -> Option<RatingLevel> {
    match value.trim().to_lowercase().as_str() {
        "good" | "tốt" | "tot" => Some(RatingLevel::Good),
        "average" | "trung bình" | "trung binh" => Some(RatingLevel::Average),
        "weak" | "yếu" | "yeu" => Some(RatingLevel::Weak),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
