// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and services.

use newsroom_domain::{Identity, Requester};
use newsroom_persistence::{Persistence, PersistenceError, SessionData, UserData};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::{ApiError, AuthError, REQUIRED_FIELD_MESSAGE, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{FormErrors, LoginResponse, SignupRequest, SignupResponse};

/// Who is asking, and for which path.
///
/// Every operation receives one explicitly; there is no ambient
/// "current user".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub requester: Requester,
    /// Path and query of the request, used as the post-login target.
    pub path: String,
}

impl RequestContext {
    #[must_use]
    pub fn anonymous(path: impl Into<String>) -> Self {
        Self {
            requester: Requester::Anonymous,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn authenticated(identity: Identity, path: impl Into<String>) -> Self {
        Self {
            requester: Requester::Authenticated(identity),
            path: path.into(),
        }
    }

    /// Returns the requester's identity, or sends them to log in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::LoginRequired` carrying this request's path if the
    /// requester is anonymous.
    pub fn require_identity(&self) -> Result<Identity, ApiError> {
        self.requester.identity().ok_or_else(|| {
            debug!(path = %self.path, "Anonymous request needs login");
            ApiError::LoginRequired {
                next: self.path.clone(),
            }
        })
    }
}

/// Registers users and manages their sessions.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Registers a user after checking the username and password policy.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the username is blank or taken or the
    /// password breaks the policy, `ApiError::Internal` if storage fails.
    pub fn signup(
        persistence: &mut Persistence,
        request: &SignupRequest,
    ) -> Result<SignupResponse, ApiError> {
        let username: &str = request.username.trim();
        if username.is_empty() {
            return Err(ApiError::Validation(FormErrors::single(
                "username",
                REQUIRED_FIELD_MESSAGE,
            )));
        }

        PasswordPolicy::default().validate(
            &request.password,
            &request.password_confirmation,
            username,
        )?;

        let user_id: i64 = persistence
            .create_user(username, &request.password)
            .map_err(translate_persistence_error)?;

        info!(user_id, username, "User registered");

        Ok(SignupResponse {
            user_id,
            username: username.to_string(),
        })
    }

    /// Checks credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is unknown, the password is wrong or
    /// the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<LoginResponse, AuthError> {
        let user: UserData = persistence
            .get_user_by_username(username)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid username or password"),
            })?;

        let valid: bool = Persistence::verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !valid {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid username or password"),
            });
        }

        let session_token: String = Self::generate_session_token();
        persistence
            .create_session(
                &session_token,
                user.user_id,
                now,
                now + Self::DEFAULT_SESSION_EXPIRATION,
            )
            .map_err(Self::map_persistence_error)?;

        info!(user_id = user.user_id, "User logged in");

        Ok(LoginResponse {
            session_token,
            user_id: user.user_id,
            username: user.username,
        })
    }

    /// Resolves a session token to its user.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown, the session has expired or
    /// its user no longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<UserData, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if now > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence
            .update_session_activity(session.session_id, now)
            .map_err(Self::map_persistence_error)?;

        Ok(user)
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        info!("Session closed");
        Ok(())
    }

    /// Generates a 128-bit random session token as hex.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
