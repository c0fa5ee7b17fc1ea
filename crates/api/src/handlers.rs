// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operations of the news and notes applications.
//!
//! Each write runs the same stages in order: authentication gate,
//! ownership check for existing records, field validation, then the store
//! write. Nothing is written unless every earlier stage passed.

use newsroom_domain::{
    Access, Comment, DomainError, Identity, ListingPolicy, NewComment, NewNote, News, NewsDraft,
    Note, NoteChanges, RecordStore, Slug, authorize, check_comment_text, resolve_slug,
    validate_comment_text, validate_news_fields, validate_note_fields,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::RequestContext;
use crate::config::Settings;
use crate::error::{
    ApiError, translate_domain_error, translate_domain_errors, translate_store_error,
};
use crate::request_response::{
    CommentForm, HomeResponse, NewsDetailResponse, NoteDetailResponse, NoteForm, NotesListResponse,
    PublishNewsRequest, Redirect,
};

/// Where note writes send the client.
pub const SUCCESS_URL: &str = "/done/";

/// The login page anonymous requesters are sent to.
pub const LOGIN_URL: &str = "/auth/login/";

/// Characters left as-is in the `next` parameter; path separators stay readable.
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[must_use]
pub fn news_detail_url(news_id: i64) -> String {
    format!("/news/{news_id}/")
}

/// The comment section of a news page.
#[must_use]
pub fn comments_url(news_id: i64) -> String {
    format!("{}#comments", news_detail_url(news_id))
}

/// The login page, returning to `next` afterwards.
///
/// `next` is percent-encoded as a single query value, so a query string in
/// the original path cannot add parameters of its own.
#[must_use]
pub fn login_redirect_url(next: &str) -> String {
    format!("{LOGIN_URL}?next={}", utf8_percent_encode(next, NEXT_ENCODE_SET))
}

// ========================================================================
// News
// ========================================================================

/// Lists the newest news items for the home page.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub fn home<S: RecordStore>(store: &mut S, settings: &Settings) -> Result<HomeResponse, ApiError> {
    let policy: ListingPolicy = settings.listing_policy();

    let news: Vec<News> = store
        .list_news(Some(policy.news_count_on_home_page()))
        .map_err(|e| translate_store_error(e, settings))?;

    Ok(HomeResponse {
        news: policy.paginate_home(news),
    })
}

/// Shows a news item with its comments, oldest first.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if the news item does not exist.
pub fn news_detail<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    news_id: i64,
) -> Result<NewsDetailResponse, ApiError> {
    let news: News = find_news(store, settings, news_id)?;

    let comments: Vec<Comment> = store
        .list_comments_for_news(news_id)
        .map_err(|e| translate_store_error(e, settings))?;

    Ok(NewsDetailResponse {
        news,
        comments: ListingPolicy::order_comments(comments),
        comment_form_available: context.requester.is_authenticated(),
    })
}

/// Publishes a news item.
///
/// News has no author; this is used by the administrative CLI.
///
/// # Errors
///
/// Returns `ApiError::Validation` if the title or text is invalid.
pub fn publish_news<S: RecordStore>(
    store: &mut S,
    settings: &Settings,
    request: &PublishNewsRequest,
) -> Result<News, ApiError> {
    let title: &str = request.title.trim();
    let text: &str = request.text.trim();

    validate_news_fields(title, text).map_err(|e| translate_domain_error(e, settings))?;

    let news: News = store
        .create_news(&NewsDraft {
            title: title.to_string(),
            text: text.to_string(),
            date: request.date,
        })
        .map_err(|e| translate_store_error(e, settings))?;

    info!(news_id = news.news_id, "News item published");
    Ok(news)
}

fn find_news<S: RecordStore>(
    store: &mut S,
    settings: &Settings,
    news_id: i64,
) -> Result<News, ApiError> {
    store
        .find_news_by_id(news_id)
        .map_err(|e| translate_store_error(e, settings))?
        .ok_or_else(|| {
            debug!(news_id, "News item not found");
            ApiError::NotFound {
                resource: format!("News item {news_id}"),
            }
        })
}

// ========================================================================
// Comments
// ========================================================================

/// Posts a comment on a news item.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters,
/// `ApiError::NotFound` if the news item does not exist and
/// `ApiError::Validation` if the text is blank or contains a banned word.
pub fn create_comment<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    news_id: i64,
    form: &CommentForm,
    now: OffsetDateTime,
) -> Result<Redirect, ApiError> {
    let author: Identity = context.require_identity()?;
    find_news(store, settings, news_id)?;

    let text: &str = check_comment(&form.text, settings)?;

    let comment: Comment = store
        .create_comment(&NewComment {
            news_id,
            author,
            text: text.to_string(),
            created: now,
        })
        .map_err(|e| translate_store_error(e, settings))?;

    info!(comment_id = comment.comment_id, news_id, %author, "Comment posted");
    Ok(Redirect::to(comments_url(news_id)))
}

/// Replaces the text of the requester's own comment.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters,
/// `ApiError::NotFound` if the comment is missing or not the requester's,
/// and `ApiError::Validation` if the new text is rejected.
pub fn edit_comment<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    comment_id: i64,
    form: &CommentForm,
) -> Result<Redirect, ApiError> {
    let requester: Identity = context.require_identity()?;
    let comment: Comment = find_own_comment(store, settings, requester, comment_id)?;

    let text: &str = check_comment(&form.text, settings)?;

    store
        .update_comment_text(comment_id, text)
        .map_err(|e| translate_store_error(e, settings))?;

    info!(comment_id, "Comment edited");
    Ok(Redirect::to(comments_url(comment.news_id)))
}

/// Deletes the requester's own comment.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters and
/// `ApiError::NotFound` if the comment is missing or not the requester's.
pub fn delete_comment<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    comment_id: i64,
) -> Result<Redirect, ApiError> {
    let requester: Identity = context.require_identity()?;
    let comment: Comment = find_own_comment(store, settings, requester, comment_id)?;

    store
        .delete_comment(comment_id)
        .map_err(|e| translate_store_error(e, settings))?;

    info!(comment_id, "Comment deleted");
    Ok(Redirect::to(comments_url(comment.news_id)))
}

fn find_own_comment<S: RecordStore>(
    store: &mut S,
    settings: &Settings,
    requester: Identity,
    comment_id: i64,
) -> Result<Comment, ApiError> {
    let not_found = || ApiError::NotFound {
        resource: format!("Comment {comment_id}"),
    };

    let comment: Comment = store
        .find_comment_by_id(comment_id)
        .map_err(|e| translate_store_error(e, settings))?
        .ok_or_else(not_found)?;

    match authorize(requester, &comment) {
        Access::Allowed => Ok(comment),
        Access::NotFound => {
            debug!(comment_id, %requester, "Comment belongs to another user");
            Err(not_found())
        }
    }
}

/// Validates comment text and returns it with surrounding whitespace removed.
fn check_comment<'a>(text: &'a str, settings: &Settings) -> Result<&'a str, ApiError> {
    let text: &str = text.trim();

    validate_comment_text(text).map_err(|e| translate_domain_error(e, settings))?;
    check_comment_text(text, &settings.banned_words).map_err(|e| {
        debug!(error = %e, "Comment rejected by moderation");
        translate_domain_error(e, settings)
    })?;

    Ok(text)
}

// ========================================================================
// Notes
// ========================================================================

/// Lists the requester's notes.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters.
pub fn list_notes<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
) -> Result<NotesListResponse, ApiError> {
    let owner: Identity = context.require_identity()?;

    let notes: Vec<Note> = store
        .list_notes_by_owner(owner)
        .map_err(|e| translate_store_error(e, settings))?;

    Ok(NotesListResponse {
        notes: ListingPolicy::order_notes(notes),
    })
}

/// Shows one of the requester's notes.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters and
/// `ApiError::NotFound` if the note is missing or not the requester's.
pub fn note_detail<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    slug: &str,
) -> Result<NoteDetailResponse, ApiError> {
    let requester: Identity = context.require_identity()?;
    let note: Note = find_own_note(store, settings, requester, slug)?;
    Ok(NoteDetailResponse { note })
}

/// Creates a note for the requester.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters and
/// `ApiError::Validation` if a field is invalid or the slug is taken.
pub fn create_note<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    form: &NoteForm,
    now: OffsetDateTime,
) -> Result<Redirect, ApiError> {
    let author: Identity = context.require_identity()?;
    let slug: Slug = check_note(store, settings, form, None)?;

    let note: Note = store
        .create_note(&NewNote {
            title: form.title.trim().to_string(),
            text: form.text.trim().to_string(),
            slug,
            author,
            created: now,
        })
        .map_err(|e| translate_store_error(e, settings))?;

    info!(note_id = note.note_id, slug = %note.slug, %author, "Note created");
    Ok(Redirect::to(SUCCESS_URL))
}

/// Edits one of the requester's notes. Keeping the current slug is allowed.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters,
/// `ApiError::NotFound` if the note is missing or not the requester's, and
/// `ApiError::Validation` if a field is invalid or the slug is taken.
pub fn edit_note<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    slug: &str,
    form: &NoteForm,
) -> Result<Redirect, ApiError> {
    let requester: Identity = context.require_identity()?;
    let note: Note = find_own_note(store, settings, requester, slug)?;
    let new_slug: Slug = check_note(store, settings, form, Some(note.note_id))?;

    store
        .update_note(
            note.note_id,
            &NoteChanges {
                title: form.title.trim().to_string(),
                text: form.text.trim().to_string(),
                slug: new_slug,
            },
        )
        .map_err(|e| translate_store_error(e, settings))?;

    info!(note_id = note.note_id, "Note edited");
    Ok(Redirect::to(SUCCESS_URL))
}

/// Deletes one of the requester's notes.
///
/// # Errors
///
/// Returns `ApiError::LoginRequired` for anonymous requesters and
/// `ApiError::NotFound` if the note is missing or not the requester's.
pub fn delete_note<S: RecordStore>(
    store: &mut S,
    context: &RequestContext,
    settings: &Settings,
    slug: &str,
) -> Result<Redirect, ApiError> {
    let requester: Identity = context.require_identity()?;
    let note: Note = find_own_note(store, settings, requester, slug)?;

    store
        .delete_note(note.note_id)
        .map_err(|e| translate_store_error(e, settings))?;

    info!(note_id = note.note_id, "Note deleted");
    Ok(Redirect::to(SUCCESS_URL))
}

fn find_own_note<S: RecordStore>(
    store: &mut S,
    settings: &Settings,
    requester: Identity,
    slug: &str,
) -> Result<Note, ApiError> {
    let not_found = || ApiError::NotFound {
        resource: format!("Note '{slug}'"),
    };

    let note: Note = store
        .find_note_by_slug(slug)
        .map_err(|e| translate_store_error(e, settings))?
        .ok_or_else(not_found)?;

    if authorize(requester, &note).is_allowed() {
        Ok(note)
    } else {
        debug!(slug, %requester, "Note belongs to another user");
        Err(not_found())
    }
}

/// Validates a note form and resolves its slug.
///
/// All field errors are reported together. The slug is only checked for
/// uniqueness once it is well-formed and there is a title or slug to use.
fn check_note<S: RecordStore>(
    store: &mut S,
    settings: &Settings,
    form: &NoteForm,
    editing_note_id: Option<i64>,
) -> Result<Slug, ApiError> {
    let title: &str = form.title.trim();
    let text: &str = form.text.trim();
    let supplied_slug: Option<&str> = form.slug.as_deref();

    let mut errors: Vec<DomainError> = validate_note_fields(title, text, supplied_slug)
        .err()
        .unwrap_or_default();

    let slug_well_formed: bool = !errors.iter().any(|e| {
        matches!(
            e,
            DomainError::InvalidSlug { .. } | DomainError::FieldTooLong { field: "slug", .. }
        )
    });
    let has_slug_source: bool =
        !title.is_empty() || supplied_slug.is_some_and(|s| !s.trim().is_empty());

    if slug_well_formed && has_slug_source {
        let existing = store
            .existing_slugs(editing_note_id)
            .map_err(|e| translate_store_error(e, settings))?;

        match resolve_slug(title, supplied_slug, &existing) {
            Ok(slug) if errors.is_empty() => return Ok(slug),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }

    debug!(count = errors.len(), "Note form rejected");
    Err(translate_domain_errors(errors, settings))
}
