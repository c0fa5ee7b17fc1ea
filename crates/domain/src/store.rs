// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage port for news, comments and notes.
//!
//! Request handling depends only on this trait. Storage faults surface as
//! the implementation's `Error` type and are opaque to the policies.

use std::collections::HashSet;
use time::{Date, OffsetDateTime};

use crate::slug::Slug;
use crate::types::{Comment, Identity, News, Note};

/// A news item about to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    pub title: String,
    pub text: String,
    pub date: Date,
}

/// A comment about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub news_id: i64,
    pub author: Identity,
    pub text: String,
    pub created: OffsetDateTime,
}

/// A note about to be stored. The slug must already be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: Slug,
    pub author: Identity,
    pub created: OffsetDateTime,
}

/// The editable fields of a note. Author and creation time are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: String,
    pub text: String,
    pub slug: Slug,
}

/// Persistence of typed records.
///
/// Methods take `&mut self` because adapters typically hold a single
/// database connection.
pub trait RecordStore {
    /// Storage failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stores a news item.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn create_news(&mut self, draft: &NewsDraft) -> Result<News, Self::Error>;

    /// Looks up a news item.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing item is `Ok(None)`.
    fn find_news_by_id(&mut self, news_id: i64) -> Result<Option<News>, Self::Error>;

    /// Lists news newest first (by date, then by descending ID), optionally
    /// limited to the first `limit` items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_news(&mut self, limit: Option<usize>) -> Result<Vec<News>, Self::Error>;

    /// Stores a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the news item
    /// or author does not exist.
    fn create_comment(&mut self, comment: &NewComment) -> Result<Comment, Self::Error>;

    /// Looks up a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing comment is `Ok(None)`.
    fn find_comment_by_id(&mut self, comment_id: i64) -> Result<Option<Comment>, Self::Error>;

    /// Lists the comments of one news item, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_comments_for_news(&mut self, news_id: i64) -> Result<Vec<Comment>, Self::Error>;

    /// Replaces the text of a comment and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the comment does not exist or the update fails.
    fn update_comment_text(&mut self, comment_id: i64, text: &str)
    -> Result<Comment, Self::Error>;

    /// Removes a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_comment(&mut self, comment_id: i64) -> Result<(), Self::Error>;

    /// Counts all stored comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count_comments(&mut self) -> Result<i64, Self::Error>;

    /// Stores a note.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a storage-level
    /// slug uniqueness violation.
    fn create_note(&mut self, note: &NewNote) -> Result<Note, Self::Error>;

    /// Looks up a note by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing note is `Ok(None)`.
    fn find_note_by_slug(&mut self, slug: &str) -> Result<Option<Note>, Self::Error>;

    /// Lists the notes owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_notes_by_owner(&mut self, owner: Identity) -> Result<Vec<Note>, Self::Error>;

    /// Returns every slug in use, except the one of `exclude_note_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn existing_slugs(&mut self, exclude_note_id: Option<i64>)
    -> Result<HashSet<String>, Self::Error>;

    /// Applies changes to a note and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the note does not exist or the update fails.
    fn update_note(&mut self, note_id: i64, changes: &NoteChanges) -> Result<Note, Self::Error>;

    /// Removes a note.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_note(&mut self, note_id: i64) -> Result<(), Self::Error>;

    /// Counts all stored notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count_notes(&mut self) -> Result<i64, Self::Error>;
}
