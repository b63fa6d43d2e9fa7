use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_macros::debug_handler;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{
    dto::{MessageResponse, NoteRequest, NoteResponse},
    error::ServiceError,
    service::NoteService,
};

pub const WELCOME: &str = "Welcome to the notes API. Take notes quickly and keep track of them.";
pub const DELETED: &str = "Note deleted successfully!";

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        get_all_notes,
        get_one_note,
        update_note,
        delete_note
    ),
    components(schemas(NoteResponse, NoteRequest, MessageResponse)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notes", get(get_all_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_one_note).put(update_note).delete(delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (status, Json(MessageResponse::new(text))).into_response()
}

/// Maps a service failure to its status code. Store failures are logged and
/// answered with `fallback` instead of the underlying error.
fn error_response(e: &ServiceError, fallback: &str) -> Response {
    match e {
        ServiceError::Validation(_) => message(StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::NotFound(_) => message(StatusCode::NOT_FOUND, e.to_string()),
        ServiceError::Store(store_error) => {
            tracing::error!("{}: {}", fallback, store_error);
            message(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
    }
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    tracing::warn!("rejected request body: {}", rejection);
    message(StatusCode::BAD_REQUEST, rejection.body_text())
}

#[debug_handler]
async fn root() -> Response {
    message(StatusCode::OK, WELCOME)
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Note content is missing or empty", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match service.create_note(payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(&e, "Failed to create note"),
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => error_response(&e, "Failed to get all notes"),
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get_one_note(&id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(&e, "Failed to get note"),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Note content is missing or empty", body = MessageResponse),
        (status = 404, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match service.update_note(&id, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(&e, "Failed to update note"),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete_note(&id).await {
        Ok(()) => message(StatusCode::OK, DELETED),
        Err(e) => error_response(&e, "Failed to delete note"),
    }
}
