// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use newsroom_domain::{NewNote, Note, NoteChanges};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::notes;
use crate::error::{PersistenceError, map_unique_violation};
use crate::queries;
use crate::timestamps::format_instant;

fn not_found(note_id: i64) -> PersistenceError {
    PersistenceError::NotFound(format!("Note {note_id}"))
}

/// Stores a note under its resolved slug.
///
/// # Errors
///
/// Returns `PersistenceError::SlugTaken` if the slug is already stored,
/// or an error if the insert fails.
pub fn create_note(conn: &mut SqliteConnection, note: &NewNote) -> Result<Note, PersistenceError> {
    diesel::insert_into(notes::table)
        .values((
            notes::title.eq(&note.title),
            notes::text.eq(&note.text),
            notes::slug.eq(note.slug.as_str()),
            notes::author_id.eq(note.author.user_id()),
            notes::created_at.eq(format_instant(note.created)?),
        ))
        .execute(conn)
        .map_err(|e| {
            map_unique_violation(e, || PersistenceError::SlugTaken(note.slug.to_string()))
        })?;

    let note_id: i64 = get_last_insert_rowid(conn)?;
    debug!(note_id, slug = %note.slug, author = note.author.user_id(), "Note created");

    queries::notes::find_note_by_id(conn, note_id)?.ok_or_else(|| not_found(note_id))
}

/// Applies new title, text and slug to a note.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no note has this ID,
/// `PersistenceError::SlugTaken` if another note holds the new slug.
pub fn update_note(
    conn: &mut SqliteConnection,
    note_id: i64,
    changes: &NoteChanges,
) -> Result<Note, PersistenceError> {
    let rows_affected: usize = diesel::update(notes::table)
        .filter(notes::note_id.eq(note_id))
        .set((
            notes::title.eq(&changes.title),
            notes::text.eq(&changes.text),
            notes::slug.eq(changes.slug.as_str()),
        ))
        .execute(conn)
        .map_err(|e| {
            map_unique_violation(e, || PersistenceError::SlugTaken(changes.slug.to_string()))
        })?;

    if rows_affected == 0 {
        return Err(not_found(note_id));
    }

    debug!(note_id, slug = %changes.slug, "Note updated");
    queries::notes::find_note_by_id(conn, note_id)?.ok_or_else(|| not_found(note_id))
}

/// Deletes a note.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no note has this ID.
pub fn delete_note(conn: &mut SqliteConnection, note_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(notes::table)
        .filter(notes::note_id.eq(note_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(not_found(note_id));
    }

    debug!(note_id, "Note deleted");
    Ok(())
}
