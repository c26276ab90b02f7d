//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    ChatMessageRequest, ErrorResponse, FieldErrorView, FormErrorsResponse, PlatformRequest,
    PlatformsResponse, SessionView, VersionResponse,
};
use super::AppState;
use crate::form::{UploadedImage, PROOF_FIELD};
use crate::runtime::{RuntimeError, SessionSnapshot};
use crate::session::{Platform, UnknownPlatform};
use crate::state_machine::{Event, TransitionError};
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use std::collections::HashMap;

/// Payment proof screenshots can be large
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the SPA
        .route("/", get(serve_spa))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        .route("/api/platforms", get(list_platforms))
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(end_session))
        // User actions
        .route("/api/sessions/:id/platform", post(select_platform))
        .route("/api/sessions/:id/chat", post(send_chat))
        .route(
            "/api/sessions/:id/form",
            post(submit_form).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// SPA Handler
// ============================================================

async fn serve_spa() -> Response {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

async fn list_platforms() -> Json<PlatformsResponse> {
    Json(PlatformsResponse::default())
}

// ============================================================
// Sessions
// ============================================================

fn view(snapshot: &SessionSnapshot) -> SessionView {
    SessionView::new(snapshot, Local::now().date_naive())
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let snapshot = state.sessions.create().await;
    (StatusCode::CREATED, Json(view(&snapshot)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let snapshot = state.sessions.snapshot(&id).await?;
    Ok(Json(view(&snapshot)))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn select_platform(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PlatformRequest>,
) -> Result<Json<SessionView>, AppError> {
    let platform: Platform = req
        .platform
        .parse()
        .map_err(|e: UnknownPlatform| AppError::BadRequest(e.to_string()))?;

    let (_, snapshot) = state
        .sessions
        .dispatch(&id, Event::PlatformSelected { platform })
        .await?;
    Ok(Json(view(&snapshot)))
}

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatMessageRequest>,
) -> Result<Json<SessionView>, AppError> {
    let (_, snapshot) = state
        .sessions
        .dispatch(&id, Event::UserMessage { text: req.text })
        .await?;
    Ok(Json(view(&snapshot)))
}

async fn submit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (values, images) = read_submission(multipart).await?;
    tracing::debug!(
        session = %id,
        fields = values.len(),
        images = images.len(),
        "Form submission received"
    );

    let (outcome, snapshot) = state
        .sessions
        .dispatch(&id, Event::FormSubmitted { values, images })
        .await?;

    if outcome.validation_errors.is_empty() {
        return Ok(Json(view(&snapshot)).into_response());
    }

    let body = FormErrorsResponse {
        errors: outcome
            .validation_errors
            .iter()
            .map(FieldErrorView::from)
            .collect(),
        session: view(&snapshot),
    };
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response())
}

/// Split a multipart body into field values and proof images.
///
/// A file input left empty by the browser still sends a part, with an empty
/// filename and no bytes. Those are skipped.
async fn read_submission(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Vec<UploadedImage>), AppError> {
    let mut values = HashMap::new();
    let mut images = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PROOF_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid upload: {e}")))?;
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            let image = UploadedImage::new(file_name, bytes.to_vec())
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            tracing::debug!(file = image.file_name(), "Proof image received");
            images.push(image);
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid field '{name}': {e}")))?;
            values.insert(name, text);
        }
    }

    Ok((values, images))
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse::default())
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(error: RuntimeError) -> Self {
        match error {
            RuntimeError::NotFound(_) => AppError::NotFound(error.to_string()),
            RuntimeError::Transition(TransitionError::Busy) => {
                AppError::Conflict(error.to_string())
            }
            RuntimeError::Transition(_) => AppError::BadRequest(error.to_string()),
            RuntimeError::Task(_) => AppError::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
