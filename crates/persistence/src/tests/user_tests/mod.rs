// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for user and session persistence operations.

use time::Duration;

use super::{create_test_persistence, create_test_time, create_test_user};
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_user_hashes_password() {
    let mut persistence = create_test_persistence();
    let identity = create_test_user(&mut persistence, "author");

    let user = persistence
        .get_user_by_username("author")
        .unwrap()
        .unwrap();
    assert_eq!(user.identity(), identity);
    assert_ne!(user.password_hash, "password");
    assert!(Persistence::verify_password("password", &user.password_hash).unwrap());
    assert!(!Persistence::verify_password("wrong", &user.password_hash).unwrap());
}

#[test]
fn test_duplicate_username_is_rejected() {
    let mut persistence = create_test_persistence();
    create_test_user(&mut persistence, "author");

    let result = persistence.create_user("author", "other");
    assert_eq!(
        result,
        Err(PersistenceError::UsernameTaken(String::from("author")))
    );
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_usernames_are_case_sensitive() {
    let mut persistence = create_test_persistence();
    create_test_user(&mut persistence, "author");

    assert!(persistence.get_user_by_username("AUTHOR").unwrap().is_none());
    assert!(persistence.create_user("AUTHOR", "password").is_ok());
}

#[test]
fn test_get_user_by_id() {
    let mut persistence = create_test_persistence();
    let identity = create_test_user(&mut persistence, "author");

    let user = persistence.get_user_by_id(identity.user_id()).unwrap();
    assert_eq!(user.map(|u| u.username), Some(String::from("author")));
    assert!(persistence.get_user_by_id(999).unwrap().is_none());
}

#[test]
fn test_session_lifecycle() {
    let mut persistence = create_test_persistence();
    let identity = create_test_user(&mut persistence, "author");
    let now = create_test_time();

    let session_id = persistence
        .create_session("token-1", identity.user_id(), now, now + Duration::days(30))
        .unwrap();

    let session = persistence
        .get_session_by_token("token-1")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, identity.user_id());
    assert_eq!(session.expires_at, "2026-02-03T12:00:00.000000000Z");

    persistence
        .update_session_activity(session_id, now + Duration::hours(1))
        .unwrap();
    let session = persistence
        .get_session_by_token("token-1")
        .unwrap()
        .unwrap();
    assert_eq!(session.last_activity_at, "2026-01-04T13:00:00Z");

    persistence.delete_session("token-1").unwrap();
    assert!(persistence.get_session_by_token("token-1").unwrap().is_none());
}

#[test]
fn test_delete_unknown_session_is_not_an_error() {
    let mut persistence = create_test_persistence();
    assert!(persistence.delete_session("missing").is_ok());
}

#[test]
fn test_session_requires_existing_user() {
    let mut persistence = create_test_persistence();
    let now = create_test_time();

    let result = persistence.create_session("token", 42, now, now + Duration::days(1));
    assert!(result.is_err());
}

#[test]
fn test_delete_expired_sessions() {
    let mut persistence = create_test_persistence();
    let identity = create_test_user(&mut persistence, "author");
    let now = create_test_time();

    persistence
        .create_session("old", identity.user_id(), now - Duration::days(31), now - Duration::days(1))
        .unwrap();
    persistence
        .create_session("fresh", identity.user_id(), now, now + Duration::days(30))
        .unwrap();

    assert_eq!(persistence.delete_expired_sessions(now).unwrap(), 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("fresh").unwrap().is_some());
}

#[test]
fn test_session_expiring_later_in_the_same_second_is_kept() {
    let mut persistence = create_test_persistence();
    let identity = create_test_user(&mut persistence, "author");
    let now = create_test_time();

    persistence
        .create_session(
            "almost",
            identity.user_id(),
            now - Duration::days(30),
            now + Duration::milliseconds(500),
        )
        .unwrap();
    persistence
        .create_session(
            "gone",
            identity.user_id(),
            now - Duration::days(30),
            now - Duration::milliseconds(250),
        )
        .unwrap();

    assert_eq!(persistence.delete_expired_sessions(now).unwrap(), 1);
    assert!(persistence.get_session_by_token("almost").unwrap().is_some());
    assert!(persistence.get_session_by_token("gone").unwrap().is_none());
}
