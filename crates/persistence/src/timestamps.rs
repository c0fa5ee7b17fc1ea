// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text column encodings for dates and instants.
//!
//! Instants are stored in UTC with a fixed nine-digit fraction, so every
//! value has the same width and lexical order in SQL matches chronological
//! order. Publication dates are stored as `YYYY-MM-DD`.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::PersistenceError;

const INSTANT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub fn format_instant(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(instant.to_offset(UtcOffset::UTC).format(INSTANT_FORMAT)?)
}

pub fn parse_instant(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(PrimitiveDateTime::parse(value, INSTANT_FORMAT)?.assume_utc())
}

pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    Ok(date.format(DATE_FORMAT)?)
}

pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Ok(Date::parse(value, DATE_FORMAT)?)
}
