// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use newsroom_domain::DomainError;
use newsroom_persistence::PersistenceError;

use crate::config::Settings;
use crate::password_policy::PasswordPolicyError;
use crate::request_response::FormErrors;

/// Message for a required field left blank.
pub const REQUIRED_FIELD_MESSAGE: &str = "Обязательное поле.";

/// Message for a slug with characters outside `[A-Za-z0-9_-]`.
pub const INVALID_SLUG_MESSAGE: &str = "Значение должно состоять только из латинских букв, цифр, знаков подчеркивания или дефиса.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    AuthenticationFailed { reason: String },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Outcomes of an operation other than success.
///
/// Only `Internal` is a fault; the others are expected answers to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// An anonymous requester attempted a mutation or a private read.
    LoginRequired { next: String },
    /// The record is missing or owned by someone else.
    NotFound { resource: String },
    /// The submitted form is invalid; it is shown again with these errors.
    Validation(FormErrors),
    /// Credentials or session token were rejected.
    AuthenticationFailed { reason: String },
    /// Storage or another collaborator failed.
    Internal { message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoginRequired { next } => write!(f, "Login required to access {next}"),
            Self::NotFound { resource } => write!(f, "{resource} not found"),
            Self::Validation(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                write!(f, "Invalid form fields: {}", fields.join(", "))
            }
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::Validation(FormErrors::single(err.field(), err.to_string()))
    }
}

/// Maps a domain error to the form errors it produces.
///
/// Errors that are not about a submitted field become `Internal`.
#[must_use]
pub fn translate_domain_error(err: DomainError, settings: &Settings) -> ApiError {
    match field_error(err, settings) {
        Ok((field, message)) => ApiError::Validation(FormErrors::single(field, message)),
        Err(internal) => internal,
    }
}

/// Maps several domain errors into a single validation outcome.
#[must_use]
pub fn translate_domain_errors(errs: Vec<DomainError>, settings: &Settings) -> ApiError {
    let mut errors: FormErrors = FormErrors::new();
    for err in errs {
        match field_error(err, settings) {
            Ok((field, message)) => errors.add(field, message),
            Err(internal) => return internal,
        }
    }
    ApiError::Validation(errors)
}

fn field_error(
    err: DomainError,
    settings: &Settings,
) -> Result<(&'static str, String), ApiError> {
    match err {
        DomainError::SlugConflict { slug } => {
            Ok(("slug", format!("{slug}{}", settings.slug_warning)))
        }
        DomainError::ModerationRejected { .. } => Ok(("text", settings.moderation_warning.clone())),
        DomainError::EmptyField { field } => Ok((field, REQUIRED_FIELD_MESSAGE.to_string())),
        DomainError::FieldTooLong { field, max, actual } => Ok((
            field,
            format!(
                "Убедитесь, что это значение содержит не более {max} символов (сейчас {actual})."
            ),
        )),
        DomainError::InvalidSlug { .. } => Ok(("slug", INVALID_SLUG_MESSAGE.to_string())),
        DomainError::EmptyBannedWords => Err(ApiError::Internal {
            message: DomainError::EmptyBannedWords.to_string(),
        }),
    }
}

/// Maps a failure of any [`newsroom_domain::RecordStore`] implementation.
///
/// A slug taken between the uniqueness check and the write becomes the
/// same form error the check would have produced.
#[must_use]
pub fn translate_store_error<E>(err: E, settings: &Settings) -> ApiError
where
    E: std::error::Error + 'static,
{
    let source: &(dyn std::error::Error + 'static) = &err;
    match source.downcast_ref::<PersistenceError>() {
        Some(PersistenceError::SlugTaken(slug)) => translate_domain_error(
            DomainError::SlugConflict { slug: slug.clone() },
            settings,
        ),
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Maps a failure of the user and session store.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UsernameTaken(_) => ApiError::Validation(FormErrors::single(
            "username",
            "Пользователь с таким именем уже существует.",
        )),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
