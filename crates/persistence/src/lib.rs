// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the newsroom applications.
//!
//! This crate stores users, sessions, news, comments and notes in `SQLite`
//! through Diesel, and implements the domain's [`RecordStore`] port.
//!
//! ## Database
//!
//! - In-memory databases are used by tests; each instance gets a unique
//!   shared-cache name so tests never see each other's rows.
//! - File databases run in WAL mode.
//! - Migrations are embedded and applied on open.
//! - Foreign key enforcement is switched on and verified on open.
//!
//! ## Text encodings
//!
//! Instants are RFC 3339 UTC text and publication dates are `YYYY-MM-DD`,
//! so ordering by these columns in SQL is chronological.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use newsroom_domain::{
    Comment, Identity, NewComment, NewNote, News, NewsDraft, Note, NoteChanges, RecordStore,
};
use time::OffsetDateTime;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod timestamps;

#[cfg(test)]
mod tests;

pub use data_models::{SessionData, UserData};
pub use error::PersistenceError;

/// `SQLite` persistence adapter.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_newsroom_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Registers a user. The password is stored as a bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UsernameTaken` if the username exists.
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username, password)
    }

    /// Retrieves a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Counts registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a new session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        created_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(
            &mut self.conn,
            session_token,
            user_id,
            created_at,
            expires_at,
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(
        &mut self,
        session_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id, now)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn, now)
    }
}

impl RecordStore for Persistence {
    type Error = PersistenceError;

    fn create_news(&mut self, draft: &NewsDraft) -> Result<News, Self::Error> {
        mutations::news::create_news(&mut self.conn, draft)
    }

    fn find_news_by_id(&mut self, news_id: i64) -> Result<Option<News>, Self::Error> {
        queries::news::find_news_by_id(&mut self.conn, news_id)
    }

    fn list_news(&mut self, limit: Option<usize>) -> Result<Vec<News>, Self::Error> {
        queries::news::list_news(&mut self.conn, limit)
    }

    fn create_comment(&mut self, comment: &NewComment) -> Result<Comment, Self::Error> {
        mutations::comments::create_comment(&mut self.conn, comment)
    }

    fn find_comment_by_id(&mut self, comment_id: i64) -> Result<Option<Comment>, Self::Error> {
        queries::comments::find_comment_by_id(&mut self.conn, comment_id)
    }

    fn list_comments_for_news(&mut self, news_id: i64) -> Result<Vec<Comment>, Self::Error> {
        queries::comments::list_comments_for_news(&mut self.conn, news_id)
    }

    fn update_comment_text(&mut self, comment_id: i64, text: &str) -> Result<Comment, Self::Error> {
        mutations::comments::update_comment_text(&mut self.conn, comment_id, text)
    }

    fn delete_comment(&mut self, comment_id: i64) -> Result<(), Self::Error> {
        mutations::comments::delete_comment(&mut self.conn, comment_id)
    }

    fn count_comments(&mut self) -> Result<i64, Self::Error> {
        queries::comments::count_comments(&mut self.conn)
    }

    fn create_note(&mut self, note: &NewNote) -> Result<Note, Self::Error> {
        mutations::notes::create_note(&mut self.conn, note)
    }

    fn find_note_by_slug(&mut self, slug: &str) -> Result<Option<Note>, Self::Error> {
        queries::notes::find_note_by_slug(&mut self.conn, slug)
    }

    fn list_notes_by_owner(&mut self, owner: Identity) -> Result<Vec<Note>, Self::Error> {
        queries::notes::list_notes_by_owner(&mut self.conn, owner)
    }

    fn existing_slugs(
        &mut self,
        exclude_note_id: Option<i64>,
    ) -> Result<HashSet<String>, Self::Error> {
        queries::notes::existing_slugs(&mut self.conn, exclude_note_id)
    }

    fn update_note(&mut self, note_id: i64, changes: &NoteChanges) -> Result<Note, Self::Error> {
        mutations::notes::update_note(&mut self.conn, note_id, changes)
    }

    fn delete_note(&mut self, note_id: i64) -> Result<(), Self::Error> {
        mutations::notes::delete_note(&mut self.conn, note_id)
    }

    fn count_notes(&mut self) -> Result<i64, Self::Error> {
        queries::notes::count_notes(&mut self.conn)
    }
}
