// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::slug::MAX_SLUG_LENGTH;

/// Maximum length of a note title, in characters.
pub const MAX_NOTE_TITLE_LENGTH: usize = 100;

/// Maximum length of a news headline, in characters.
pub const MAX_NEWS_TITLE_LENGTH: usize = 200;

fn check_required(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

fn check_max_length(value: &str, field: &'static str, max: usize) -> Result<(), DomainError> {
    let actual: usize = value.chars().count();
    if actual > max {
        return Err(DomainError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Validates the fields of a note form.
///
/// Every violated rule is reported, not just the first. Slug uniqueness is
/// not checked here; that needs the set of existing slugs and is done by
/// [`crate::resolve_slug`].
///
/// # Errors
///
/// Returns all violations if:
/// - the title is blank or longer than [`MAX_NOTE_TITLE_LENGTH`]
/// - the text is blank
/// - a supplied slug is longer than [`MAX_SLUG_LENGTH`] or contains
///   characters other than ASCII letters, digits, `-` and `_`
pub fn validate_note_fields(
    title: &str,
    text: &str,
    supplied_slug: Option<&str>,
) -> Result<(), Vec<DomainError>> {
    let mut errors: Vec<DomainError> = Vec::new();

    if let Err(e) = check_required(title, "title")
        .and_then(|()| check_max_length(title, "title", MAX_NOTE_TITLE_LENGTH))
    {
        errors.push(e);
    }

    if let Err(e) = check_required(text, "text") {
        errors.push(e);
    }

    if let Some(slug) = supplied_slug.map(str::trim).filter(|s| !s.is_empty()) {
        if let Err(e) = check_max_length(slug, "slug", MAX_SLUG_LENGTH) {
            errors.push(e);
        } else if !slug.chars().all(is_slug_char) {
            errors.push(DomainError::InvalidSlug {
                slug: slug.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates comment text.
///
/// Moderation is a separate check, see [`crate::check_comment_text`].
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the text is blank.
pub fn validate_comment_text(text: &str) -> Result<(), DomainError> {
    check_required(text, "text")
}

/// Validates a news item before it is published.
///
/// # Errors
///
/// Returns an error if the title is blank or longer than
/// [`MAX_NEWS_TITLE_LENGTH`], or if the text is blank.
pub fn validate_news_fields(title: &str, text: &str) -> Result<(), DomainError> {
    check_required(title, "title")?;
    check_max_length(title, "title", MAX_NEWS_TITLE_LENGTH)?;
    check_required(text, "text")
}
