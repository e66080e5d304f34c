use std::sync::Arc;

use chrono::NaiveDate;

use super::common::*;
use crate::review::catalog;
use crate::review::domain::{EmployeeInfo, RatingLevel};
use crate::review::service::{ReviewService, ReviewServiceError};
use crate::review::store::SessionStore;

#[test]
fn login_persists_a_session_for_valid_credentials() {
    let (service, store) = build_service();

    let account = service
        .login("QUANLY@nhamay.vn", "vanhanh")
        .expect("case-insensitive username accepted");
    assert_eq!(account.id, "NV-0001");

    let session = store
        .current()
        .expect("store reachable")
        .expect("session persisted");
    assert_eq!(session.account.username, "quanly@nhamay.vn");
    assert!(session.ratings.is_empty());
}

#[test]
fn login_rejects_wrong_credentials() {
    let (service, store) = build_service();

    let err = service
        .login("quanly@nhamay.vn", "sai-mat-khau")
        .expect_err("wrong password rejected");
    assert!(matches!(err, ReviewServiceError::InvalidCredentials));
    assert!(store.current().expect("store reachable").is_none());
}

#[test]
fn register_assigns_an_id_and_opens_a_session() {
    let (service, store) = build_service();

    let account = service
        .register(registration("truongca@nhamay.vn"))
        .expect("registration accepted");
    assert!(account.id.starts_with("NV-"));

    let session = store
        .current()
        .expect("store reachable")
        .expect("session opened");
    assert_eq!(session.account.username, "truongca@nhamay.vn");
}

#[test]
fn register_rejects_duplicate_usernames_and_short_passwords() {
    let (service, _store) = build_service();

    let err = service
        .register(registration("Quanly@nhamay.vn"))
        .expect_err("duplicate username rejected");
    assert!(matches!(err, ReviewServiceError::UsernameTaken));

    let mut short = registration("moi@nhamay.vn");
    short.password = "ngan".to_string();
    let err = service
        .register(short)
        .expect_err("short password rejected");
    assert!(matches!(err, ReviewServiceError::PasswordTooShort));
}

#[test]
fn rate_requires_an_active_session() {
    let (service, _store) = build_service();

    let err = service
        .rate("1.1", RatingLevel::Good)
        .expect_err("no session yet");
    assert!(matches!(err, ReviewServiceError::NoActiveSession));
}

#[test]
fn rate_rejects_unknown_items() {
    let (service, _store) = logged_in_service();

    let err = service
        .rate("9.9", RatingLevel::Good)
        .expect_err("item not in rubric");
    assert!(matches!(err, ReviewServiceError::UnknownItem(id) if id == "9.9"));
}

#[test]
fn rate_updates_the_summary_and_persists_the_entry() {
    let (service, store) = logged_in_service();

    let summary = service
        .rate("1.1", RatingLevel::Average)
        .expect("rating recorded");
    assert_close(summary.total_points, 7.0);
    assert_close(summary.percent, 7.0);

    let session = store
        .current()
        .expect("store reachable")
        .expect("session persisted");
    let entry = session.ratings.get("1.1").expect("entry created");
    assert_eq!(entry.level, RatingLevel::Average);
    assert_close(entry.actual_score, 7.0);
}

#[test]
fn re_rating_preserves_existing_notes() {
    let (service, store) = logged_in_service();

    service.rate("1.1", RatingLevel::Weak).expect("first rating");
    service
        .set_note("1.1", "cần theo dõi thêm ca đêm")
        .expect("note saved");
    service
        .rate("1.1", RatingLevel::Good)
        .expect("re-rated without losing notes");

    let session = store
        .current()
        .expect("store reachable")
        .expect("session persisted");
    let entry = session.ratings.get("1.1").expect("entry present");
    assert_eq!(entry.level, RatingLevel::Good);
    assert_eq!(entry.notes, "cần theo dõi thêm ca đêm");
}

#[test]
fn notes_require_a_rated_item() {
    let (service, _store) = logged_in_service();

    let err = service
        .set_note("1.1", "ghi chú")
        .expect_err("item not rated yet");
    assert!(matches!(err, ReviewServiceError::ItemNotRated(id) if id == "1.1"));

    let err = service
        .set_note("9.9", "ghi chú")
        .expect_err("item not in rubric");
    assert!(matches!(err, ReviewServiceError::UnknownItem(_)));
}

#[test]
fn logout_clears_ratings_wholesale() {
    let (service, store) = logged_in_service();

    service.rate("1.1", RatingLevel::Good).expect("rated");
    service.rate("2.1", RatingLevel::Good).expect("rated");
    service.logout().expect("logout succeeds");
    assert!(store.current().expect("store reachable").is_none());

    service
        .login("quanly@nhamay.vn", "vanhanh")
        .expect("login again");
    let summary = service.summary().expect("summary builds");
    assert_close(summary.total_points, 0.0);
    assert_eq!(summary.ranking.label(), "---");
}

#[test]
fn employee_metadata_rides_along_with_the_session() {
    let (service, store) = logged_in_service();

    let employee = EmployeeInfo {
        name: "Trần Văn Bình".to_string(),
        id: "NV-0451".to_string(),
        position: "Quản đốc".to_string(),
        department: "Vận Hành Lò Hơi".to_string(),
        report_date: NaiveDate::from_ymd_opt(2026, 7, 31).expect("valid date"),
    };
    service
        .set_employee(employee.clone(), "2026-07".to_string())
        .expect("metadata saved");

    let session = store
        .current()
        .expect("store reachable")
        .expect("session persisted");
    assert_eq!(session.employee, Some(employee));
    assert_eq!(session.period.as_deref(), Some("2026-07"));
}

#[test]
fn store_outages_surface_as_service_errors() {
    let service = ReviewService::new(
        Arc::new(UnavailableStore),
        catalog::boiler_shift_manager(),
    );

    let err = service
        .login("quanly@nhamay.vn", "vanhanh")
        .expect_err("store offline");
    assert!(matches!(err, ReviewServiceError::Store(_)));
}
