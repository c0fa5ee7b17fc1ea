// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ordering and truncation rules for read-only listings.

use std::cmp::Reverse;
use std::num::NonZeroUsize;

use crate::types::{Comment, News, Note};

/// Listing rules for the home page and the comment thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingPolicy {
    news_count_on_home_page: NonZeroUsize,
}

impl ListingPolicy {
    /// Number of news items shown on the home page unless configured otherwise.
    pub const DEFAULT_NEWS_COUNT_ON_HOME_PAGE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

    /// Creates a policy showing at most `news_count_on_home_page` items.
    #[must_use]
    pub const fn new(news_count_on_home_page: NonZeroUsize) -> Self {
        Self {
            news_count_on_home_page,
        }
    }

    /// Returns the home page limit.
    #[must_use]
    pub const fn news_count_on_home_page(&self) -> usize {
        self.news_count_on_home_page.get()
    }

    /// Orders news newest first and keeps at most the configured count.
    ///
    /// Items published on the same date are ordered by descending
    /// `news_id`, so repeated calls always produce the same sequence.
    #[must_use]
    pub fn paginate_home(&self, mut all_news: Vec<News>) -> Vec<News> {
        all_news.sort_by_key(|news| (Reverse(news.date), Reverse(news.news_id)));
        all_news.truncate(self.news_count_on_home_page.get());
        all_news
    }

    /// Orders a comment thread oldest first.
    ///
    /// Comments with equal timestamps fall back to `comment_id` order.
    #[must_use]
    pub fn order_comments(mut all_comments: Vec<Comment>) -> Vec<Comment> {
        all_comments.sort_by_key(|comment| (comment.created, comment.comment_id));
        all_comments
    }

    /// Orders a notes listing by creation sequence.
    #[must_use]
    pub fn order_notes(mut notes: Vec<Note>) -> Vec<Note> {
        notes.sort_by_key(|note| note.note_id);
        notes
    }
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NEWS_COUNT_ON_HOME_PAGE)
    }
}
