// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slug generation and uniqueness.
//!
//! Titles are turned into slugs in these steps:
//!
//! 1. lowercase the title
//! 2. replace `&` with ` and `
//! 3. collapse runs of whitespace and `-` into a single `-`
//! 4. drop everything outside ASCII lowercase, digits, `-`, `_` and the
//!    Russian alphabet
//! 5. transliterate Russian letters to Latin
//! 6. drop the apostrophes the soft and hard signs produce

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::DomainError;

/// Maximum length of a note slug, in characters.
pub const MAX_SLUG_LENGTH: usize = 100;

const RUSSIAN_LOWERCASE: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

/// A URL-safe note identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Wraps a slug value without transforming it.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the slug, returning the owned text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Latin replacement for a single lowercase Russian letter.
const fn translit_lower(c: char) -> Option<&'static str> {
    let latin: &'static str = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "`",
        'ы' => "yi",
        'ь' => "'",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Transliterates Russian letters in `text` to Latin, leaving every other
/// character untouched.
///
/// Uppercase letters map to a capitalised replacement (`Щ` becomes `Sch`).
#[must_use]
pub fn transliterate(text: &str) -> String {
    let mut out: String = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(latin) = translit_lower(c) {
            out.push_str(latin);
            continue;
        }

        let mut lower = c.to_lowercase();
        let replacement: Option<&str> = match (lower.next(), lower.next()) {
            (Some(single), None) if single != c => translit_lower(single),
            _ => None,
        };

        match replacement {
            Some(latin) => {
                let mut chars = latin.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
            None => out.push(c),
        }
    }
    out
}

fn in_slug_alphabet(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || c == '-'
        || c == '_'
        || RUSSIAN_LOWERCASE.contains(c)
}

/// Builds a slug from free text.
///
/// The output is deterministic: the same input always yields the same
/// slug. It is truncated to [`MAX_SLUG_LENGTH`] characters and may be empty
/// when the input has no usable characters.
#[must_use]
pub fn slugify(text: &str) -> Slug {
    let lowered: String = text.to_lowercase().replace('&', " and ");

    let mut collapsed: String = String::with_capacity(lowered.len());
    let mut in_separator_run: bool = false;
    for c in lowered.chars() {
        if c == '-' || c.is_whitespace() {
            if !in_separator_run {
                collapsed.push('-');
                in_separator_run = true;
            }
        } else {
            collapsed.push(c);
            in_separator_run = false;
        }
    }

    let filtered: String = collapsed.chars().filter(|c| in_slug_alphabet(*c)).collect();

    let slug: String = transliterate(&filtered)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_SLUG_LENGTH)
        .collect();

    Slug(slug)
}

/// Picks the slug a note will be stored under.
///
/// A non-blank supplied slug is used as-is; otherwise the slug is derived
/// from the title with [`slugify`].
#[must_use]
pub fn derive_slug(title: &str, supplied_slug: Option<&str>) -> Slug {
    match supplied_slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(supplied) => Slug::new(supplied),
        None => slugify(title),
    }
}

/// Resolves the slug for a new or edited note and checks it is free.
///
/// `existing_slugs` must not contain the slug of the note being edited,
/// so re-saving a note under its own slug is not a conflict.
///
/// # Errors
///
/// Returns `DomainError::SlugConflict` if the resolved slug is already
/// taken, or `DomainError::EmptyField` if no slug could be derived from
/// the title.
pub fn resolve_slug<S: std::hash::BuildHasher>(
    title: &str,
    supplied_slug: Option<&str>,
    existing_slugs: &HashSet<String, S>,
) -> Result<Slug, DomainError> {
    let slug: Slug = derive_slug(title, supplied_slug);

    if slug.as_str().is_empty() {
        return Err(DomainError::EmptyField { field: "slug" });
    }

    if existing_slugs.contains(slug.as_str()) {
        return Err(DomainError::SlugConflict { slug: slug.0 });
    }

    Ok(slug)
}
