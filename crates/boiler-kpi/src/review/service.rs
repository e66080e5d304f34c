use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{EmployeeInfo, RatingLevel, Rubric};
use super::report::ReviewReport;
use super::scoring::{ScoreSummary, ScoringEngine, ScoringError};
use super::store::{SessionStore, StoreError, StoredSession, UserAccount};

/// Service composing the session store and the scoring engine.
///
/// It is the single mutating actor over the evaluation session: every rating
/// or note edit goes through here, and the score summary is recomputed
/// synchronously from the persisted state on each call.
pub struct ReviewService<S> {
    store: Arc<S>,
    engine: Arc<ScoringEngine>,
}

static ACCOUNT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_account_id() -> String {
    let id = ACCOUNT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("NV-{id:04}")
}

/// Account fields supplied at registration; the id is assigned by the service.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub department: String,
}

impl<S> ReviewService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, rubric: Rubric) -> Self {
        Self {
            store,
            engine: Arc::new(ScoringEngine::new(rubric)),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Verify credentials against the stored accounts and open a session.
    pub fn login(&self, username: &str, password: &str) -> Result<UserAccount, ReviewServiceError> {
        let account = self
            .store
            .accounts()?
            .into_iter()
            .find(|account| {
                account.username.eq_ignore_ascii_case(username) && account.password == password
            })
            .ok_or(ReviewServiceError::InvalidCredentials)?;

        self.store.save(StoredSession::open(account.clone()))?;
        Ok(account)
    }

    /// Create an account and open a session for it, as the sign-up form does.
    pub fn register(&self, registration: Registration) -> Result<UserAccount, ReviewServiceError> {
        if registration.password.chars().count() < 6 {
            return Err(ReviewServiceError::PasswordTooShort);
        }
        let taken = self
            .store
            .accounts()?
            .iter()
            .any(|account| account.username.eq_ignore_ascii_case(&registration.username));
        if taken {
            return Err(ReviewServiceError::UsernameTaken);
        }

        let account = UserAccount {
            id: next_account_id(),
            username: registration.username,
            password: registration.password,
            full_name: registration.full_name,
            role: registration.role,
            department: registration.department,
        };
        self.store.add_account(account.clone())?;
        self.store.save(StoredSession::open(account.clone()))?;
        Ok(account)
    }

    /// The active session, if one is persisted.
    pub fn current(&self) -> Result<Option<StoredSession>, ReviewServiceError> {
        Ok(self.store.current()?)
    }

    /// Drop the session and every rating recorded in it.
    pub fn logout(&self) -> Result<(), ReviewServiceError> {
        Ok(self.store.clear()?)
    }

    /// Record a rating for one rubric item and return the refreshed summary.
    /// Existing notes on the item survive re-rating.
    pub fn rate(
        &self,
        item_id: &str,
        level: RatingLevel,
    ) -> Result<ScoreSummary, ReviewServiceError> {
        let mut session = self.require_session()?;
        let item = self
            .engine
            .rubric()
            .find_item(item_id)
            .ok_or_else(|| ReviewServiceError::UnknownItem(item_id.to_string()))?;
        let actual_score = self.engine.item_score(item, level)?;
        session.ratings.rate(item_id, level, actual_score);

        let summary = self.engine.summarize(&session.ratings)?;
        self.store.save(session)?;
        Ok(summary)
    }

    /// Edit the notes on an already-rated item without touching its level.
    pub fn set_note(&self, item_id: &str, note: &str) -> Result<(), ReviewServiceError> {
        let mut session = self.require_session()?;
        if self.engine.rubric().find_item(item_id).is_none() {
            return Err(ReviewServiceError::UnknownItem(item_id.to_string()));
        }
        if !session.ratings.set_note(item_id, note) {
            return Err(ReviewServiceError::ItemNotRated(item_id.to_string()));
        }
        self.store.save(session)?;
        Ok(())
    }

    /// Attach report metadata to the session.
    pub fn set_employee(
        &self,
        employee: EmployeeInfo,
        period: String,
    ) -> Result<(), ReviewServiceError> {
        let mut session = self.require_session()?;
        session.employee = Some(employee);
        session.period = Some(period);
        self.store.save(session)?;
        Ok(())
    }

    /// Recompute the score summary from the persisted ratings.
    pub fn summary(&self) -> Result<ScoreSummary, ReviewServiceError> {
        let session = self.require_session()?;
        Ok(self.engine.summarize(&session.ratings)?)
    }

    /// Assemble the full report (summary plus category rows) for the session.
    pub fn report(&self) -> Result<ReviewReport, ReviewServiceError> {
        let session = self.require_session()?;
        Ok(ReviewReport::build(&self.engine, &session.ratings)?)
    }

    fn require_session(&self) -> Result<StoredSession, ReviewServiceError> {
        self.store
            .current()?
            .ok_or(ReviewServiceError::NoActiveSession)
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("username already registered")]
    UsernameTaken,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("no active review session")]
    NoActiveSession,
    #[error("unknown KPI item {0}")]
    UnknownItem(String),
    #[error("item {0} has no rating to annotate")]
    ItemNotRated(String),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
