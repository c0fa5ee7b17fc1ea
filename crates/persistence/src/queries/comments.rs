// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use newsroom_domain::{Comment, Identity};
use tracing::debug;

use crate::diesel_schema::comments;
use crate::error::PersistenceError;
use crate::timestamps::parse_instant;

/// Diesel Queryable struct for comment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = comments)]
struct CommentRow {
    comment_id: i64,
    news_id: i64,
    author_id: i64,
    text: String,
    created_at: String,
}

impl TryFrom<CommentRow> for Comment {
    type Error = PersistenceError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            comment_id: row.comment_id,
            news_id: row.news_id,
            author: Identity::new(row.author_id),
            text: row.text,
            created: parse_instant(&row.created_at)?,
        })
    }
}

/// Retrieves a comment by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored timestamp is malformed.
pub fn find_comment_by_id(
    conn: &mut SqliteConnection,
    comment_id: i64,
) -> Result<Option<Comment>, PersistenceError> {
    debug!(comment_id, "Looking up comment");

    comments::table
        .filter(comments::comment_id.eq(comment_id))
        .select(CommentRow::as_select())
        .first::<CommentRow>(conn)
        .optional()?
        .map(Comment::try_from)
        .transpose()
}

/// Lists the comments of a news item, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is malformed.
pub fn list_comments_for_news(
    conn: &mut SqliteConnection,
    news_id: i64,
) -> Result<Vec<Comment>, PersistenceError> {
    debug!(news_id, "Listing comments");

    comments::table
        .filter(comments::news_id.eq(news_id))
        .order((comments::created_at.asc(), comments::comment_id.asc()))
        .select(CommentRow::as_select())
        .load::<CommentRow>(conn)?
        .into_iter()
        .map(Comment::try_from)
        .collect()
}

/// Counts all comments.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_comments(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(comments::table.count().get_result(conn)?)
}
