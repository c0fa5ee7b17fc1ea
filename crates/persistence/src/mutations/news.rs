// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use newsroom_domain::{News, NewsDraft};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::news;
use crate::error::PersistenceError;
use crate::queries;
use crate::timestamps::format_date;

/// Publishes a news item.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_news(
    conn: &mut SqliteConnection,
    draft: &NewsDraft,
) -> Result<News, PersistenceError> {
    diesel::insert_into(news::table)
        .values((
            news::title.eq(&draft.title),
            news::text.eq(&draft.text),
            news::date.eq(format_date(draft.date)?),
        ))
        .execute(conn)?;

    let news_id: i64 = get_last_insert_rowid(conn)?;
    debug!(news_id, date = %draft.date, "News item published");

    queries::news::find_news_by_id(conn, news_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("News item {news_id}")))
}
