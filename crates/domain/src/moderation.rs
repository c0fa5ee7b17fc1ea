// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Words rejected in comments unless configured otherwise.
pub const DEFAULT_BANNED_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// The configured list of words comments may not contain.
///
/// Matching is case-sensitive substring containment. The list keeps its
/// configured order, which decides which word is reported when a text
/// contains several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct BannedWords {
    words: Vec<String>,
}

impl BannedWords {
    /// Builds a banned word list.
    ///
    /// Blank entries are discarded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyBannedWords` if no non-blank word remains.
    pub fn new<I, W>(words: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| !word.trim().is_empty())
            .collect();

        if words.is_empty() {
            return Err(DomainError::EmptyBannedWords);
        }

        Ok(Self { words })
    }

    /// Returns the configured words in order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the first banned word contained in `text`, if any.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.words
            .iter()
            .map(String::as_str)
            .find(|word| text.contains(word))
    }
}

impl TryFrom<Vec<String>> for BannedWords {
    type Error = DomainError;

    fn try_from(words: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<BannedWords> for Vec<String> {
    fn from(banned_words: BannedWords) -> Self {
        banned_words.words
    }
}

impl Default for BannedWords {
    fn default() -> Self {
        Self {
            words: DEFAULT_BANNED_WORDS.iter().map(|word| (*word).to_string()).collect(),
        }
    }
}

/// Checks comment text against the banned word list.
///
/// # Errors
///
/// Returns `DomainError::ModerationRejected` naming the first banned word
/// found in `text`.
pub fn check_comment_text(text: &str, banned_words: &BannedWords) -> Result<(), DomainError> {
    match banned_words.first_match(text) {
        Some(word) => Err(DomainError::ModerationRejected {
            word: word.to_string(),
        }),
        None => Ok(()),
    }
}
