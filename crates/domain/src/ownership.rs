// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Comment, Identity, Note};

/// Outcome of an ownership check.
///
/// There is no "forbidden" variant: a non-owner gets the same
/// answer as a request for a record that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The requester owns the record.
    Allowed,
    /// Treat the record as absent.
    NotFound,
}

impl Access {
    /// Returns whether the operation may proceed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// A record with a single owner who holds mutation rights.
pub trait Owned {
    /// The identity recorded as owner at creation time.
    fn owner(&self) -> Identity;
}

impl Owned for Comment {
    fn owner(&self) -> Identity {
        self.author
    }
}

impl Owned for Note {
    fn owner(&self) -> Identity {
        self.author
    }
}

/// Decides whether `requester` may edit or delete `record`.
#[must_use]
pub fn authorize<R: Owned + ?Sized>(requester: Identity, record: &R) -> Access {
    if record.owner() == requester {
        Access::Allowed
    } else {
        Access::NotFound
    }
}
