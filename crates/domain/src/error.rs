// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors produced by domain validation and policy checks.
///
/// All of these are expected, user-correctable outcomes. None of them
/// indicates a system fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The resolved slug is already used by another note.
    #[error("Slug '{slug}' is already in use")]
    SlugConflict {
        /// The conflicting slug.
        slug: String,
    },
    /// Comment text contains a banned word.
    #[error("Text contains the banned word '{word}'")]
    ModerationRejected {
        /// The first banned word found in the text.
        word: String,
    },
    /// A required field is empty or whitespace.
    #[error("Field '{field}' must not be empty")]
    EmptyField {
        /// The offending field.
        field: &'static str,
    },
    /// A field exceeds its maximum length in characters.
    #[error("Field '{field}' must be at most {max} characters (got {actual})")]
    FieldTooLong {
        /// The offending field.
        field: &'static str,
        /// The allowed maximum.
        max: usize,
        /// The submitted length.
        actual: usize,
    },
    /// A supplied slug contains characters outside `[A-Za-z0-9_-]`.
    #[error("Slug '{slug}' may only contain Latin letters, digits, hyphens and underscores")]
    InvalidSlug {
        /// The rejected slug.
        slug: String,
    },
    /// The banned word list was configured empty.
    #[error("Banned word list must not be empty")]
    EmptyBannedWords,
}
