// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use diesel::prelude::*;
use diesel::SqliteConnection;
use newsroom_domain::{Identity, Note, Slug};
use tracing::debug;

use crate::diesel_schema::notes;
use crate::error::PersistenceError;
use crate::timestamps::parse_instant;

/// Diesel Queryable struct for note rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notes)]
struct NoteRow {
    note_id: i64,
    title: String,
    text: String,
    slug: String,
    author_id: i64,
    created_at: String,
}

impl TryFrom<NoteRow> for Note {
    type Error = PersistenceError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            note_id: row.note_id,
            title: row.title,
            text: row.text,
            slug: Slug::new(&row.slug),
            author: Identity::new(row.author_id),
            created: parse_instant(&row.created_at)?,
        })
    }
}

/// Retrieves a note by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored timestamp is malformed.
pub fn find_note_by_id(
    conn: &mut SqliteConnection,
    note_id: i64,
) -> Result<Option<Note>, PersistenceError> {
    debug!(note_id, "Looking up note by ID");

    notes::table
        .filter(notes::note_id.eq(note_id))
        .select(NoteRow::as_select())
        .first::<NoteRow>(conn)
        .optional()?
        .map(Note::try_from)
        .transpose()
}

/// Retrieves a note by slug.
///
/// # Errors
///
/// Returns an error if the query fails or the stored timestamp is malformed.
pub fn find_note_by_slug(
    conn: &mut SqliteConnection,
    slug: &str,
) -> Result<Option<Note>, PersistenceError> {
    debug!(slug, "Looking up note by slug");

    notes::table
        .filter(notes::slug.eq(slug))
        .select(NoteRow::as_select())
        .first::<NoteRow>(conn)
        .optional()?
        .map(Note::try_from)
        .transpose()
}

/// Lists the notes of one author in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn list_notes_by_owner(
    conn: &mut SqliteConnection,
    owner: Identity,
) -> Result<Vec<Note>, PersistenceError> {
    debug!(owner = owner.user_id(), "Listing notes");

    notes::table
        .filter(notes::author_id.eq(owner.user_id()))
        .order(notes::note_id.asc())
        .select(NoteRow::as_select())
        .load::<NoteRow>(conn)?
        .into_iter()
        .map(Note::try_from)
        .collect()
}

/// Returns every stored slug, optionally leaving out one note's own slug.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn existing_slugs(
    conn: &mut SqliteConnection,
    exclude_note_id: Option<i64>,
) -> Result<HashSet<String>, PersistenceError> {
    let mut query = notes::table.select(notes::slug).into_boxed();

    if let Some(note_id) = exclude_note_id {
        query = query.filter(notes::note_id.ne(note_id));
    }

    Ok(query.load::<String>(conn)?.into_iter().collect())
}

/// Counts all notes.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_notes(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(notes::table.count().get_result(conn)?)
}
