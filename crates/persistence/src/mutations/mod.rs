// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Inserts read back the stored record through the matching query so the
//! caller always sees what the database holds.

pub mod comments;
pub mod news;
pub mod notes;
pub mod users;
