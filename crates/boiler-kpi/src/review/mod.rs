//! Monthly KPI review domain: the fixed shift-manager rubric, the scoring
//! engine that turns sparse per-item ratings into category and total scores,
//! the evaluation session owned by the signed-in reviewer, and the report
//! assembly consumed by the HTTP and CLI frontends.

pub mod catalog;
pub mod domain;
pub mod import;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validate;

#[cfg(test)]
mod tests;

pub use domain::{
    Criterion, EmployeeInfo, EvaluationState, ItemRating, KpiCategory, KpiItem, RatingLevel,
    Rubric,
};
pub use import::{RatingsCsvImporter, RatingsImportError};
pub use report::{text_report, ReviewReport, ReviewReportView};
pub use router::review_router;
pub use scoring::{
    CategoryBreakdown, CategoryScoreResult, Ranking, ScoreSummary, ScoringEngine, ScoringError,
};
pub use service::{Registration, ReviewService, ReviewServiceError};
pub use store::{AccountView, SessionStore, StoreError, StoredSession, UserAccount};
pub use validate::{validate, RubricDefect};
