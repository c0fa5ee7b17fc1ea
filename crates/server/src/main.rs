// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Form, Json, Router,
    extract::{Path, State as AxumState, rejection::FormRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, Subcommand};
use newsroom_api::{
    ApiError, AuthenticationService, CommentForm, FormErrors, HomeResponse, LOGIN_URL,
    LoginRequest, LoginResponse, NewsDetailResponse, NoteDetailResponse, NoteForm,
    NotesListResponse, PublishNewsRequest, Redirect, Settings, SignupRequest,
    ValidationErrorResponse, login_redirect_url,
};
use newsroom_domain::News;
use newsroom_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::session::{Session, SessionError, bearer_token};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Newsroom Server - news with comments and personal notes over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Number of news items shown on the home page
    #[arg(long, default_value_t = 10)]
    news_count_on_home_page: usize,

    /// Word rejected in comments; repeat to ban several. Replaces the default list.
    #[arg(long = "banned-word")]
    banned_words: Vec<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a news item and exit.
    Publish {
        /// Headline
        #[arg(long)]
        title: String,

        /// Body text
        #[arg(long)]
        text: String,

        /// Publication date (YYYY-MM-DD); today if omitted
        #[arg(long)]
        date: Option<String>,
    },
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The single database connection, locked per request.
    persistence: Arc<Mutex<Persistence>>,
    settings: Arc<Settings>,
}

/// Body of the page shown after a successful note write.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SuccessPageResponse {
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Non-success outcomes of a route, as HTTP responses.
enum HttpError {
    /// The requester must log in first.
    LoginRequired { next: String },
    /// The form is shown again with its errors.
    Validation(FormErrors),
    Status { status: StatusCode, message: String },
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            Self::LoginRequired { next } => redirect(&login_redirect_url(&next)),
            Self::Validation(errors) => {
                (StatusCode::OK, Json(ValidationErrorResponse { errors })).into_response()
            }
            Self::Status { status, message } => {
                let body: Json<ErrorResponse> = Json(ErrorResponse {
                    error: true,
                    message,
                });
                (status, body).into_response()
            }
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::LoginRequired { next } => {
                debug!(next = %next, "Redirecting to login");
                Self::LoginRequired { next }
            }
            ApiError::Validation(errors) => Self::Validation(errors),
            ApiError::NotFound { .. } => Self::Status {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::AuthenticationFailed { .. } => Self::Status {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                Self::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        Self::Status {
            status: StatusCode::UNAUTHORIZED,
            message: err.to_string(),
        }
    }
}

/// A `302 Found` response.
fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn redirect_to(target: &Redirect) -> Response {
    redirect(&target.location)
}

/// Unwraps a form body, reading an unparseable one as an empty form.
///
/// The body is only looked at inside the api call, after the login and
/// ownership checks, so an empty form comes back as field errors.
fn form_or_empty<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(%rejection, "Form body rejected, reading it as empty");
            T::default()
        }
    }
}

// ========================================================================
// News and comments
// ========================================================================

/// Handler for GET `/`.
async fn handle_home(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HomeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: HomeResponse = newsroom_api::home(&mut *persistence, &app_state.settings)?;
    Ok(Json(response))
}

/// Handler for GET `/news/{news_id}/`.
async fn handle_news_detail(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    Path(news_id): Path<i64>,
) -> Result<Json<NewsDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: NewsDetailResponse =
        newsroom_api::news_detail(&mut *persistence, &context, &app_state.settings, news_id)?;
    Ok(Json(response))
}

/// Handler for POST `/news/{news_id}/`.
///
/// Posts a comment on the news item.
async fn handle_create_comment(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    Path(news_id): Path<i64>,
    form: Result<Form<CommentForm>, FormRejection>,
) -> Result<Response, HttpError> {
    info!(news_id, "Handling create_comment request");

    let mut persistence = app_state.persistence.lock().await;
    let target: Redirect = newsroom_api::create_comment(
        &mut *persistence,
        &context,
        &app_state.settings,
        news_id,
        &form_or_empty(form),
        OffsetDateTime::now_utc(),
    )?;
    Ok(redirect_to(&target))
}

/// Handler for POST `/edit_comment/{comment_id}/`.
async fn handle_edit_comment(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    Path(comment_id): Path<i64>,
    form: Result<Form<CommentForm>, FormRejection>,
) -> Result<Response, HttpError> {
    info!(comment_id, "Handling edit_comment request");

    let mut persistence = app_state.persistence.lock().await;
    let target: Redirect = newsroom_api::edit_comment(
        &mut *persistence,
        &context,
        &app_state.settings,
        comment_id,
        &form_or_empty(form),
    )?;
    Ok(redirect_to(&target))
}

/// Handler for POST and DELETE `/delete_comment/{comment_id}/`.
async fn handle_delete_comment(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    Path(comment_id): Path<i64>,
) -> Result<Response, HttpError> {
    info!(comment_id, "Handling delete_comment request");

    let mut persistence = app_state.persistence.lock().await;
    let target: Redirect = newsroom_api::delete_comment(
        &mut *persistence,
        &context,
        &app_state.settings,
        comment_id,
    )?;
    Ok(redirect_to(&target))
}

// ========================================================================
// Notes
// ========================================================================

/// Handler for GET `/notes/`.
async fn handle_list_notes(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
) -> Result<Json<NotesListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: NotesListResponse =
        newsroom_api::list_notes(&mut *persistence, &context, &app_state.settings)?;
    Ok(Json(response))
}

/// Handler for GET `/note/{slug}/`.
async fn handle_note_detail(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    Path(slug): Path<String>,
) -> Result<Json<NoteDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: NoteDetailResponse =
        newsroom_api::note_detail(&mut *persistence, &context, &app_state.settings, &slug)?;
    Ok(Json(response))
}

/// Handler for POST `/add/`.
async fn handle_create_note(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Result<Response, HttpError> {
    info!("Handling create_note request");

    let mut persistence = app_state.persistence.lock().await;
    let target: Redirect = newsroom_api::create_note(
        &mut *persistence,
        &context,
        &app_state.settings,
        &form_or_empty(form),
        OffsetDateTime::now_utc(),
    )?;
    Ok(redirect_to(&target))
}

/// Handler for POST `/edit/{slug}/`.
async fn handle_edit_note(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    Path(slug): Path<String>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Result<Response, HttpError> {
    info!(slug = %slug, "Handling edit_note request");

    let mut persistence = app_state.persistence.lock().await;
    let target: Redirect = newsroom_api::edit_note(
        &mut *persistence,
        &context,
        &app_state.settings,
        &slug,
        &form_or_empty(form),
    )?;
    Ok(redirect_to(&target))
}

/// Handler for POST and DELETE `/delete/{slug}/`.
async fn handle_delete_note(
    AxumState(app_state): AxumState<AppState>,
    Session(context): Session,
    Path(slug): Path<String>,
) -> Result<Response, HttpError> {
    info!(slug = %slug, "Handling delete_note request");

    let mut persistence = app_state.persistence.lock().await;
    let target: Redirect =
        newsroom_api::delete_note(&mut *persistence, &context, &app_state.settings, &slug)?;
    Ok(redirect_to(&target))
}

/// Handler for GET `/done/`.
#[allow(clippy::unused_async)]
async fn handle_success_page() -> Json<SuccessPageResponse> {
    Json(SuccessPageResponse {
        message: String::from("Успешно!"),
    })
}

// ========================================================================
// Users and sessions
// ========================================================================

/// Handler for POST `/auth/signup/`.
///
/// Registers the user and sends them to the login page.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    Form(request): Form<SignupRequest>,
) -> Result<Response, HttpError> {
    info!(username = %request.username, "Handling signup request");

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::signup(&mut persistence, &request)?;
    Ok(redirect(LOGIN_URL))
}

/// Handler for POST `/auth/login/`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %request.username, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = AuthenticationService::login(
        &mut persistence,
        &request.username,
        &request.password,
        OffsetDateTime::now_utc(),
    )
    .map_err(ApiError::from)?;
    Ok(Json(response))
}

/// Handler for POST `/auth/logout/`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let token: &str = bearer_token(&headers)?.ok_or(SessionError::MissingAuthorizationHeader)?;

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::logout(&mut persistence, token).map_err(ApiError::from)?;
    Ok(redirect("/"))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_home))
        .route(
            "/news/{news_id}/",
            get(handle_news_detail).post(handle_create_comment),
        )
        .route("/edit_comment/{comment_id}/", post(handle_edit_comment))
        .route(
            "/delete_comment/{comment_id}/",
            post(handle_delete_comment).delete(handle_delete_comment),
        )
        .route("/notes/", get(handle_list_notes))
        .route("/add/", post(handle_create_note))
        .route("/note/{slug}/", get(handle_note_detail))
        .route("/edit/{slug}/", post(handle_edit_note))
        .route(
            "/delete/{slug}/",
            post(handle_delete_note).delete(handle_delete_note),
        )
        .route("/done/", get(handle_success_page))
        .route("/auth/signup/", post(handle_signup))
        .route("/auth/login/", post(handle_login))
        .route("/auth/logout/", post(handle_logout))
        .with_state(app_state)
}

/// Publishes a news item from the command line.
fn publish(
    persistence: &mut Persistence,
    settings: &Settings,
    title: String,
    text: String,
    date: Option<&str>,
) -> Result<News, Box<dyn std::error::Error>> {
    let date: Date = match date {
        Some(value) => Date::parse(value, DATE_FORMAT)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let news: News = newsroom_api::publish_news(
        persistence,
        settings,
        &PublishNewsRequest { title, text, date },
    )?;
    Ok(news)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Newsroom Server");

    let settings: Settings = Settings::new(args.news_count_on_home_page, args.banned_words)?;

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(Command::Publish { title, text, date }) = args.command {
        if args.database.is_none() {
            warn!("Publishing to an in-memory database; the item is lost on exit");
        }
        let news: News = publish(&mut persistence, &settings, title, text, date.as_deref())?;
        info!(news_id = news.news_id, date = %news.date, "Published news item");
        return Ok(());
    }

    let removed: usize = persistence.delete_expired_sessions(OffsetDateTime::now_utc())?;
    if removed > 0 {
        info!(removed, "Removed expired sessions");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        settings: Arc::new(settings),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
