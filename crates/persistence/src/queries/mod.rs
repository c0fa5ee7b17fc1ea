// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `users` — user accounts and sessions
//! - `news` — published news items
//! - `comments` — comment threads
//! - `notes` — per-user notes and the slug index

pub mod comments;
pub mod news;
pub mod notes;
pub mod users;
