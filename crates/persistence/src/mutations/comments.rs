// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use newsroom_domain::{Comment, NewComment};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::comments;
use crate::error::PersistenceError;
use crate::queries;
use crate::timestamps::format_instant;

fn not_found(comment_id: i64) -> PersistenceError {
    PersistenceError::NotFound(format!("Comment {comment_id}"))
}

/// Stores a comment.
///
/// # Errors
///
/// Returns an error if the insert fails, including a foreign key violation
/// when the news item or author does not exist.
pub fn create_comment(
    conn: &mut SqliteConnection,
    comment: &NewComment,
) -> Result<Comment, PersistenceError> {
    diesel::insert_into(comments::table)
        .values((
            comments::news_id.eq(comment.news_id),
            comments::author_id.eq(comment.author.user_id()),
            comments::text.eq(&comment.text),
            comments::created_at.eq(format_instant(comment.created)?),
        ))
        .execute(conn)?;

    let comment_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        comment_id,
        news_id = comment.news_id,
        author = comment.author.user_id(),
        "Comment created"
    );

    queries::comments::find_comment_by_id(conn, comment_id)?.ok_or_else(|| not_found(comment_id))
}

/// Replaces the text of a comment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no comment has this ID.
pub fn update_comment_text(
    conn: &mut SqliteConnection,
    comment_id: i64,
    text: &str,
) -> Result<Comment, PersistenceError> {
    let rows_affected: usize = diesel::update(comments::table)
        .filter(comments::comment_id.eq(comment_id))
        .set(comments::text.eq(text))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(not_found(comment_id));
    }

    debug!(comment_id, "Comment text updated");
    queries::comments::find_comment_by_id(conn, comment_id)?.ok_or_else(|| not_found(comment_id))
}

/// Deletes a comment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no comment has this ID.
pub fn delete_comment(
    conn: &mut SqliteConnection,
    comment_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(comments::table)
        .filter(comments::comment_id.eq(comment_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(not_found(comment_id));
    }

    debug!(comment_id, "Comment deleted");
    Ok(())
}
