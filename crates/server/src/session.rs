// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Every route learns who is asking through [`Session`]. A request without
//! an `Authorization` header is anonymous; a header that is malformed or
//! names an unknown or expired session is rejected with 401.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use newsroom_api::{AuthenticationService, RequestContext};
use newsroom_domain::Identity;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::AppState;

/// The requester of the current request, together with its path.
///
/// ```ignore
/// async fn my_handler(Session(context): Session) -> Response {
///     // context.requester is Anonymous or Authenticated
/// }
/// ```
pub struct Session(pub RequestContext);

impl FromRequestParts<AppState> for Session {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let path: String = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);

        let Some(token) = bearer_token(&parts.headers)? else {
            return Ok(Self(RequestContext::anonymous(path)));
        };

        let mut persistence = state.persistence.lock().await;
        let user = AuthenticationService::validate_session(
            &mut persistence,
            token,
            OffsetDateTime::now_utc(),
        )
        .map_err(|e| {
            warn!(error = %e, "Session validation failed");
            SessionError::InvalidSession(e.to_string())
        })?;
        drop(persistence);

        debug!(user_id = user.user_id, "Session validated");

        Ok(Self(RequestContext::authenticated(
            Identity::new(user.user_id),
            path,
        )))
    }
}

/// Reads the bearer token, if the request carries one.
///
/// # Errors
///
/// Returns an error if the `Authorization` header is present but is not a
/// well-formed `Bearer <token>` value.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, SessionError> {
    let Some(header) = headers.get("Authorization") else {
        return Ok(None);
    };

    let header: &str = header.to_str().map_err(|_| {
        warn!("Invalid Authorization header encoding");
        SessionError::InvalidAuthorizationHeader
    })?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .map(Some)
        .ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// A token was required but none was sent.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthorizationHeader => write!(f, "Missing Authorization header"),
            Self::InvalidAuthorizationHeader => write!(
                f,
                "Invalid Authorization header format. Expected: 'Bearer <token>'"
            ),
            Self::InvalidSession(reason) => write!(f, "Session validation failed: {reason}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}
