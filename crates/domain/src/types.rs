// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::slug::Slug;

/// An opaque reference to a registered user.
///
/// Equality is the only operation ownership checks rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    user_id: i64,
}

impl Identity {
    /// Creates an identity for the given user ID.
    #[must_use]
    pub const fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    /// Returns the underlying user ID.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user#{}", self.user_id)
    }
}

/// Who is making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requester {
    /// No valid session accompanied the request.
    Anonymous,
    /// A logged-in user.
    Authenticated(Identity),
}

impl Requester {
    /// Returns the identity for an authenticated requester.
    #[must_use]
    pub const fn identity(&self) -> Option<Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(*identity),
        }
    }

    /// Returns whether the requester is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// A published news item.
///
/// News is created by an external publisher and is never mutated by
/// readers. `date` is the publication date, not the insertion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    /// Database identifier.
    pub news_id: i64,
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Publication date.
    pub date: Date,
}

/// A reader comment attached to a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Database identifier.
    pub comment_id: i64,
    /// The news item this comment belongs to. Never changes.
    pub news_id: i64,
    /// The commenting user. Never changes.
    pub author: Identity,
    /// Comment body; the only editable field.
    pub text: String,
    /// Submission time.
    pub created: OffsetDateTime,
}

/// A personal note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Database identifier.
    pub note_id: i64,
    pub title: String,
    pub text: String,
    /// Globally unique URL identifier.
    pub slug: Slug,
    pub author: Identity,
    pub created: OffsetDateTime,
}
