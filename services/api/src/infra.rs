use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use boiler_kpi::review::{SessionStore, StoreError, StoredSession, UserAccount};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Demo reviewer account available out of the box.
pub(crate) fn seed_accounts() -> Vec<UserAccount> {
    vec![UserAccount {
        id: "NV-0001".to_string(),
        username: "quandoc@nhamay.vn".to_string(),
        password: "vanhanh123".to_string(),
        full_name: "Trần Văn Bình".to_string(),
        role: "Quản đốc".to_string(),
        department: "Vận Hành Lò Hơi".to_string(),
    }]
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoreFile {
    accounts: Vec<UserAccount>,
    session: Option<StoredSession>,
}

/// Volatile session store for serve-without-persistence and the CLI demo.
pub(crate) struct InMemorySessionStore {
    accounts: Mutex<Vec<UserAccount>>,
    session: Mutex<Option<StoredSession>>,
}

impl InMemorySessionStore {
    pub(crate) fn seeded() -> Self {
        Self {
            accounts: Mutex::new(seed_accounts()),
            session: Mutex::new(None),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn accounts(&self) -> Result<Vec<UserAccount>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .expect("account mutex poisoned")
            .clone())
    }

    fn add_account(&self, account: UserAccount) -> Result<(), StoreError> {
        let mut guard = self.accounts.lock().expect("account mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.username.eq_ignore_ascii_case(&account.username))
        {
            return Err(StoreError::Conflict);
        }
        guard.push(account);
        Ok(())
    }

    fn current(&self) -> Result<Option<StoredSession>, StoreError> {
        Ok(self.session.lock().expect("session mutex poisoned").clone())
    }

    fn save(&self, session: StoredSession) -> Result<(), StoreError> {
        *self.session.lock().expect("session mutex poisoned") = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.session.lock().expect("session mutex poisoned") = None;
        Ok(())
    }
}

/// JSON-file-backed store, the local-storage stand-in.
///
/// The whole database is one serde document re-read on every access. A file
/// that is missing or fails to parse counts as the seeded default database;
/// only I/O write failures surface as errors.
pub(crate) struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> StoreFile {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return StoreFile {
                accounts: seed_accounts(),
                session: None,
            };
        };
        serde_json::from_str(&raw).unwrap_or_else(|_| StoreFile {
            accounts: seed_accounts(),
            session: None,
        })
    }

    fn persist(&self, file: &StoreFile) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(file)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| StoreError::Unavailable(err.to_string()))?;
            }
        }
        fs::write(&self.path, payload).map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

impl SessionStore for JsonFileSessionStore {
    fn accounts(&self) -> Result<Vec<UserAccount>, StoreError> {
        Ok(self.load().accounts)
    }

    fn add_account(&self, account: UserAccount) -> Result<(), StoreError> {
        let mut file = self.load();
        if file
            .accounts
            .iter()
            .any(|existing| existing.username.eq_ignore_ascii_case(&account.username))
        {
            return Err(StoreError::Conflict);
        }
        file.accounts.push(account);
        self.persist(&file)
    }

    fn current(&self) -> Result<Option<StoredSession>, StoreError> {
        Ok(self.load().session)
    }

    fn save(&self, session: StoredSession) -> Result<(), StoreError> {
        let mut file = self.load();
        file.session = Some(session);
        self.persist(&file)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut file = self.load();
        file.session = None;
        self.persist(&file)
    }
}

/// Store selected at startup; serve uses memory unless a path was given.
pub(crate) enum StoreBackend {
    Memory(InMemorySessionStore),
    File(JsonFileSessionStore),
}

impl StoreBackend {
    pub(crate) fn open(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(JsonFileSessionStore::open(path)),
            None => Self::Memory(InMemorySessionStore::seeded()),
        }
    }
}

impl SessionStore for StoreBackend {
    fn accounts(&self) -> Result<Vec<UserAccount>, StoreError> {
        match self {
            Self::Memory(store) => store.accounts(),
            Self::File(store) => store.accounts(),
        }
    }

    fn add_account(&self, account: UserAccount) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.add_account(account),
            Self::File(store) => store.add_account(account),
        }
    }

    fn current(&self) -> Result<Option<StoredSession>, StoreError> {
        match self {
            Self::Memory(store) => store.current(),
            Self::File(store) => store.current(),
        }
    }

    fn save(&self, session: StoredSession) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(session),
            Self::File(store) => store.save(session),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.clear(),
            Self::File(store) => store.clear(),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("boiler-kpi-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_reads_as_seeded_defaults() {
        let path = scratch_path("missing");
        let _ = fs::remove_file(&path);
        let store = JsonFileSessionStore::open(&path);

        let accounts = store.accounts().expect("accounts load");
        assert_eq!(accounts.len(), 1);
        assert!(store.current().expect("session loads").is_none());
    }

    #[test]
    fn malformed_file_is_treated_as_absent() {
        let path = scratch_path("malformed");
        fs::write(&path, "{ this is not json").expect("scratch file writes");
        let store = JsonFileSessionStore::open(&path);

        let accounts = store.accounts().expect("accounts load");
        assert_eq!(accounts.len(), 1);
        assert!(store.current().expect("session loads").is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn sessions_round_trip_through_the_file() {
        let path = scratch_path("roundtrip");
        let _ = fs::remove_file(&path);
        let store = JsonFileSessionStore::open(&path);

        let account = seed_accounts().remove(0);
        store
            .save(StoredSession::open(account.clone()))
            .expect("session persists");

        let reopened = JsonFileSessionStore::open(&path);
        let session = reopened
            .current()
            .expect("session loads")
            .expect("session present");
        assert_eq!(session.account.username, account.username);

        reopened.clear().expect("session clears");
        assert!(reopened.current().expect("session loads").is_none());
        let _ = fs::remove_file(&path);
    }
}
