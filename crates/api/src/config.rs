// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runtime settings for request handling.

use std::num::NonZeroUsize;

use newsroom_domain::{BannedWords, DomainError, ListingPolicy};
use thiserror::Error;

/// Form error shown when a comment contains a banned word.
pub const DEFAULT_MODERATION_WARNING: &str = "Не ругайтесь!";

/// Suffix appended to a conflicting slug in the form error.
pub const DEFAULT_SLUG_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Settings errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The home page must show at least one item.
    #[error("News count on home page must be at least 1")]
    ZeroNewsCount,

    /// The banned word list is unusable.
    #[error(transparent)]
    BannedWords(#[from] DomainError),
}

/// Settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub news_count_on_home_page: NonZeroUsize,
    pub banned_words: BannedWords,
    /// Appended to the offending slug, e.g. `my-note - такой slug ...`.
    pub slug_warning: String,
    pub moderation_warning: String,
}

impl Settings {
    /// Builds settings from raw configuration values, keeping the default
    /// warnings.
    ///
    /// An empty `banned_words` list keeps the default words.
    ///
    /// # Errors
    ///
    /// Returns an error if `news_count_on_home_page` is zero or every
    /// supplied banned word is blank.
    pub fn new(
        news_count_on_home_page: usize,
        banned_words: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let news_count_on_home_page: NonZeroUsize =
            NonZeroUsize::new(news_count_on_home_page).ok_or(ConfigError::ZeroNewsCount)?;

        let banned_words: BannedWords = if banned_words.is_empty() {
            BannedWords::default()
        } else {
            BannedWords::new(banned_words)?
        };

        Ok(Self {
            news_count_on_home_page,
            banned_words,
            ..Self::default()
        })
    }

    /// The listing rules these settings describe.
    #[must_use]
    pub const fn listing_policy(&self) -> ListingPolicy {
        ListingPolicy::new(self.news_count_on_home_page)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_count_on_home_page: ListingPolicy::DEFAULT_NEWS_COUNT_ON_HOME_PAGE,
            banned_words: BannedWords::default(),
            slug_warning: DEFAULT_SLUG_WARNING.to_string(),
            moderation_warning: DEFAULT_MODERATION_WARNING.to_string(),
        }
    }
}
