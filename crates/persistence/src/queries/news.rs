// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use newsroom_domain::News;
use tracing::debug;

use crate::diesel_schema::news;
use crate::error::PersistenceError;
use crate::timestamps::parse_date;

/// Diesel Queryable struct for news rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = news)]
struct NewsRow {
    news_id: i64,
    title: String,
    text: String,
    date: String,
}

impl TryFrom<NewsRow> for News {
    type Error = PersistenceError;

    fn try_from(row: NewsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            news_id: row.news_id,
            title: row.title,
            text: row.text,
            date: parse_date(&row.date)?,
        })
    }
}

/// Retrieves a news item by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored date is malformed.
pub fn find_news_by_id(
    conn: &mut SqliteConnection,
    news_id: i64,
) -> Result<Option<News>, PersistenceError> {
    debug!(news_id, "Looking up news item");

    news::table
        .filter(news::news_id.eq(news_id))
        .select(NewsRow::as_select())
        .first::<NewsRow>(conn)
        .optional()?
        .map(News::try_from)
        .transpose()
}

/// Lists news newest first, ties broken by descending ID.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_news(
    conn: &mut SqliteConnection,
    limit: Option<usize>,
) -> Result<Vec<News>, PersistenceError> {
    debug!(?limit, "Listing news");

    let mut query = news::table
        .select(NewsRow::as_select())
        .order((news::date.desc(), news::news_id.desc()))
        .into_boxed();

    if let Some(limit) = limit {
        query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
    }

    query
        .load::<NewsRow>(conn)?
        .into_iter()
        .map(News::try_from)
        .collect()
}
