// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod user_tests;

use newsroom_domain::{Identity, NewComment, NewNote, News, NewsDraft, RecordStore, Slug};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::Persistence;

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
        .create_user(username, "password")
        .expect("user created");
    Identity::new(user_id)
}

pub fn create_test_news(persistence: &mut Persistence, title: &str, date: Date) -> News {
    persistence
        .create_news(&NewsDraft {
            title: title.to_string(),
            text: String::from("Просто текст."),
            date,
        })
        .expect("news created")
}

pub fn new_comment(news_id: i64, author: Identity, created: OffsetDateTime) -> NewComment {
    NewComment {
        news_id,
        author,
        text: String::from("Текст комментария"),
        created,
    }
}

pub fn new_note(author: Identity, slug: &str) -> NewNote {
    NewNote {
        title: String::from("Заголовок"),
        text: String::from("Текст"),
        slug: Slug::new(slug),
        author,
        created: create_test_time(),
    }
}
