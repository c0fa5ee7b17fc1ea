// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use newsroom_domain::{Identity, News, NewsDraft, RecordStore};
use newsroom_persistence::Persistence;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{ApiError, CommentForm, FormErrors, NoteForm, RequestContext};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_time() -> OffsetDateTime {
    datetime!(2026-01-04 12:00 UTC)
}

pub fn create_test_date() -> Date {
    date!(2026 - 01 - 04)
}

pub fn create_test_user(persistence: &mut Persistence, username: &str) -> Identity {
    let user_id: i64 = persistence
        .create_user(username, "Password123!")
        .expect("user created");
    Identity::new(user_id)
}

pub fn create_test_news(persistence: &mut Persistence) -> News {
    create_test_news_on(persistence, "Заголовок", create_test_date())
}

pub fn create_test_news_on(persistence: &mut Persistence, title: &str, date: Date) -> News {
    persistence
        .create_news(&NewsDraft {
            title: title.to_string(),
            text: String::from("Текст новости."),
            date,
        })
        .expect("news created")
}

pub fn comment_form(text: &str) -> CommentForm {
    CommentForm {
        text: text.to_string(),
    }
}

pub fn note_form(title: &str, slug: Option<&str>) -> NoteForm {
    NoteForm {
        title: title.to_string(),
        text: String::from("Текст заметки"),
        slug: slug.map(str::to_string),
    }
}

pub fn as_user(identity: Identity, path: &str) -> RequestContext {
    RequestContext::authenticated(identity, path)
}

/// Unwraps the form errors of a validation outcome.
pub fn expect_validation(err: ApiError) -> FormErrors {
    match err {
        ApiError::Validation(errors) => errors,
        other => panic!("Expected validation error, got {other:?}"),
    }
}
