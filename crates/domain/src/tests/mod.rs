// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod validation;

use time::OffsetDateTime;
use time::macros::datetime;

use crate::{Comment, Identity, Note, Slug};

pub fn author() -> Identity {
    Identity::new(1)
}

pub fn reader() -> Identity {
    Identity::new(2)
}

pub fn base_time() -> OffsetDateTime {
    datetime!(2026-01-04 12:00 UTC)
}

pub fn create_test_comment(comment_id: i64, author: Identity, created: OffsetDateTime) -> Comment {
    Comment {
        comment_id,
        news_id: 1,
        author,
        text: format!("Comment {comment_id}"),
        created,
    }
}

pub fn create_test_note(note_id: i64, author: Identity, slug: &str) -> Note {
    Note {
        note_id,
        title: String::from("Заголовок"),
        text: String::from("Текст"),
        slug: Slug::new(slug),
        author,
        created: base_time(),
    }
}
