// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Records and policy rules for the news and notes applications.
//!
//! Everything in this crate is pure: the policies take their inputs as
//! arguments and never touch storage. Persistence is reached only through
//! the [`RecordStore`] port, which adapters implement.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod listing;
mod moderation;
mod ownership;
mod slug;
mod store;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use listing::ListingPolicy;
pub use moderation::{BannedWords, DEFAULT_BANNED_WORDS, check_comment_text};
pub use ownership::{Access, Owned, authorize};
pub use slug::{MAX_SLUG_LENGTH, Slug, derive_slug, resolve_slug, slugify, transliterate};
pub use store::{NewComment, NewNote, NewsDraft, NoteChanges, RecordStore};
pub use types::{Comment, Identity, News, Note, Requester};
pub use validation::{
    MAX_NEWS_TITLE_LENGTH, MAX_NOTE_TITLE_LENGTH, validate_comment_text, validate_news_fields,
    validate_note_fields,
};
