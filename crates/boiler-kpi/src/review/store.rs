use serde::{Deserialize, Serialize};

use super::domain::{EmployeeInfo, EvaluationState};

/// Reviewer account as persisted by the session store.
///
/// Credentials are plaintext demo stand-ins; nothing here is a security
/// boundary. Use [`UserAccount::public_view`] before anything leaves the
/// process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub department: String,
}

impl UserAccount {
    pub fn public_view(&self) -> AccountView {
        AccountView {
            id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            role: self.role.clone(),
        }
    }
}

/// Credential-free account representation for API responses and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

/// The one active evaluation session: who is signed in, the report metadata,
/// and the sparse ratings. Cleared wholesale on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub account: UserAccount,
    pub employee: Option<EmployeeInfo>,
    pub period: Option<String>,
    pub ratings: EvaluationState,
}

impl StoredSession {
    pub fn open(account: UserAccount) -> Self {
        Self {
            account,
            employee: None,
            period: None,
            ratings: EvaluationState::new(),
        }
    }
}

/// Key-value-flavored persistence port for accounts and the current session.
///
/// Adapters must treat malformed persisted data as absent: recover with an
/// empty account list or no session rather than surfacing a parse failure.
/// Only transport-level faults are errors.
pub trait SessionStore: Send + Sync {
    fn accounts(&self) -> Result<Vec<UserAccount>, StoreError>;
    fn add_account(&self, account: UserAccount) -> Result<(), StoreError>;
    fn current(&self) -> Result<Option<StoredSession>, StoreError>;
    fn save(&self, session: StoredSession) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Session store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("account already exists")]
    Conflict,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
