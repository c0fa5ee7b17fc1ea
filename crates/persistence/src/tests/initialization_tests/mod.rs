// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Migrations and foreign key enforcement are also exercised implicitly by
//! every other test that opens an in-memory database.

use newsroom_domain::RecordStore;

use super::{create_test_persistence, create_test_user};
use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = create_test_persistence();
    let mut db2 = create_test_persistence();

    create_test_user(&mut db1, "author");

    assert_eq!(db1.count_users().unwrap(), 1, "db1 should have 1 user");
    assert_eq!(db2.count_users().unwrap(), 0, "db2 should have 0 users (isolated)");
}

#[test]
fn test_new_database_is_empty() {
    let mut persistence = create_test_persistence();

    assert_eq!(persistence.count_comments().unwrap(), 0);
    assert_eq!(persistence.count_notes().unwrap(), 0);
    assert!(persistence.list_news(None).unwrap().is_empty());
}
