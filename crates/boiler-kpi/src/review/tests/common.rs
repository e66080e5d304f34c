use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::review::catalog;
use crate::review::domain::{
    Criterion, EvaluationState, KpiCategory, KpiItem, RatingLevel, Rubric,
};
use crate::review::service::{Registration, ReviewService};
use crate::review::store::{SessionStore, StoreError, StoredSession, UserAccount};

pub(super) fn demo_account() -> UserAccount {
    UserAccount {
        id: "NV-0001".to_string(),
        username: "quanly@nhamay.vn".to_string(),
        password: "vanhanh".to_string(),
        full_name: "Trần Văn Bình".to_string(),
        role: "Quản đốc".to_string(),
        department: "Vận Hành Lò Hơi".to_string(),
    }
}

pub(super) fn registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        password: "motsaumatkhau".to_string(),
        full_name: "Nguyễn Thị Hoa".to_string(),
        role: "Trưởng ca".to_string(),
        department: "Vận Hành Lò Hơi".to_string(),
    }
}

/// Single item with the given per-level score fractions, handy for boundary
/// construction.
pub(super) fn rubric_item(
    id: &str,
    max_points: f64,
    good: f64,
    average: f64,
    weak: f64,
) -> KpiItem {
    let criteria = BTreeMap::from([
        (
            RatingLevel::Good,
            Criterion {
                label: RatingLevel::Good.label().to_string(),
                description: "đạt toàn bộ chỉ tiêu".to_string(),
                score_percent: good,
            },
        ),
        (
            RatingLevel::Average,
            Criterion {
                label: RatingLevel::Average.label().to_string(),
                description: "đạt một phần chỉ tiêu".to_string(),
                score_percent: average,
            },
        ),
        (
            RatingLevel::Weak,
            Criterion {
                label: RatingLevel::Weak.label().to_string(),
                description: "không đạt chỉ tiêu".to_string(),
                score_percent: weak,
            },
        ),
    ]);

    KpiItem {
        id: id.to_string(),
        code: id.to_string(),
        name: format!("Chỉ tiêu {id}"),
        max_points,
        checklist: vec!["theo dõi hàng ngày".to_string()],
        criteria,
    }
}

pub(super) fn single_item_rubric(max_points: f64, good: f64, average: f64, weak: f64) -> Rubric {
    Rubric::new(vec![KpiCategory {
        id: "cat_1".to_string(),
        name: "1. VẬN HÀNH".to_string(),
        items: vec![rubric_item("1.1", max_points, good, average, weak)],
    }])
}

pub(super) fn rated(rubric: &Rubric, level: RatingLevel) -> EvaluationState {
    let mut state = EvaluationState::new();
    for category in &rubric.categories {
        for item in &category.items {
            let score = crate::review::scoring::item_score(item, level).expect("criterion present");
            state.rate(&item.id, level, score);
        }
    }
    state
}

#[derive(Default)]
pub(super) struct MemoryStore {
    accounts: Mutex<Vec<UserAccount>>,
    session: Mutex<Option<StoredSession>>,
}

impl MemoryStore {
    pub(super) fn seeded() -> Self {
        let store = Self::default();
        store
            .accounts
            .lock()
            .expect("account mutex poisoned")
            .push(demo_account());
        store
    }
}

impl SessionStore for MemoryStore {
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

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn accounts(&self) -> Result<Vec<UserAccount>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn add_account(&self, _account: UserAccount) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn current(&self) -> Result<Option<StoredSession>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn save(&self, _session: StoredSession) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service() -> (ReviewService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    let service = ReviewService::new(store.clone(), catalog::boiler_shift_manager());
    (service, store)
}

pub(super) fn logged_in_service() -> (ReviewService<MemoryStore>, Arc<MemoryStore>) {
    let (service, store) = build_service();
    service
        .login("quanly@nhamay.vn", "vanhanh")
        .expect("seeded credentials accepted");
    (service, store)
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
