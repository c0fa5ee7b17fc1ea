// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handling for the news and notes applications.
//!
//! Handlers take a [`RequestContext`] naming the requester, run the
//! domain policies in a fixed order and return a response value or an
//! [`ApiError`]. They are transport-agnostic; the HTTP server maps the
//! outcomes onto status codes.

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

mod auth;
mod config;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, RequestContext};
pub use config::{ConfigError, DEFAULT_MODERATION_WARNING, DEFAULT_SLUG_WARNING, Settings};
pub use error::{
    ApiError, AuthError, INVALID_SLUG_MESSAGE, REQUIRED_FIELD_MESSAGE, translate_domain_error,
    translate_domain_errors, translate_persistence_error, translate_store_error,
};
pub use handlers::{
    LOGIN_URL, SUCCESS_URL, comments_url, create_comment, create_note, delete_comment, delete_note,
    edit_comment, edit_note, home, list_notes, login_redirect_url, news_detail, news_detail_url,
    note_detail, publish_news,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CommentForm, FormErrors, HomeResponse, LoginRequest, LoginResponse, NewsDetailResponse,
    NoteDetailResponse, NoteForm, NotesListResponse, PublishNewsRequest, Redirect, SignupRequest,
    SignupResponse, ValidationErrorResponse,
};
