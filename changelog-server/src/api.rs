use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch},
    Router,
};
use changelog_core::{
    validate, Changelog, ChangelogFilter, ChangelogId, ChangelogInput, ContentGenerator, Error,
    PublishRequest, Storage,
};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Mutex<Storage>>,
    pub generator: Arc<dyn ContentGenerator>,
}

impl AppState {
    fn storage(&self) -> Result<MutexGuard<'_, Storage>, ApiError> {
        self.storage
            .lock()
            .map_err(|_| ApiError::Internal("storage lock poisoned".to_string()))
    }
}

/// Handler error rendered as `{"error": .., "code": ..}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Core(Error::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("Changelog {} not found", id), "code": "NOT_FOUND" }),
            ),
            ApiError::Core(Error::Validation(report)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": report.to_string(),
                    "code": "VALIDATION_ERROR",
                    "fields": report.errors,
                }),
            ),
            ApiError::Core(Error::InvalidOperation(msg)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "BAD_REQUEST" }),
            ),
            other => {
                error!(error = %other, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/changelogs/", get(list_changelogs).post(create_changelog))
        .route("/api/changelogs", get(list_changelogs).post(create_changelog))
        .route(
            "/api/changelogs/:id",
            get(get_changelog)
                .put(update_changelog)
                .delete(delete_changelog),
        )
        .route("/api/changelogs/:id/publish", patch(publish_changelog))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

// An id that is not a UUID can never have been assigned.
fn parse_id(raw: &str) -> ApiResult<ChangelogId> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Core(Error::NotFound(raw.to_string())))
}

async fn list_changelogs(
    State(state): State<AppState>,
    Query(filter): Query<ChangelogFilter>,
) -> ApiResult<Json<Vec<Changelog>>> {
    let storage = state.storage()?;
    Ok(Json(storage.list_changelogs(filter)?))
}

async fn get_changelog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Changelog>> {
    let id = parse_id(&id)?;
    let storage = state.storage()?;
    Ok(Json(storage.get_changelog(&id)?))
}

async fn create_changelog(
    State(state): State<AppState>,
    Json(input): Json<ChangelogInput>,
) -> ApiResult<Json<Changelog>> {
    validate(&input).into_result()?;

    let content = state.generator.generate(&input);
    let changelog = Changelog::new(input, content);

    state.storage()?.create_changelog(&changelog)?;
    info!(id = %changelog.id, version = %changelog.version, "Changelog created");

    Ok(Json(changelog))
}

async fn update_changelog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ChangelogInput>,
) -> ApiResult<Json<Changelog>> {
    let id = parse_id(&id)?;
    validate(&input).into_result()?;

    let mut changelog = state.storage()?.get_changelog(&id)?;
    let content = state.generator.generate(&input);
    changelog.apply_input(input, content);

    // The stored publish state wins over the copy read before generation.
    let changelog = state.storage()?.update_changelog(&changelog)?;
    info!(id = %changelog.id, "Changelog updated");

    Ok(Json(changelog))
}

async fn publish_changelog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PublishRequest>,
) -> ApiResult<Json<Changelog>> {
    let id = parse_id(&id)?;
    let changelog = state.storage()?.set_published(&id, req.published)?;
    info!(id = %changelog.id, published = changelog.published, "Publish state changed");

    Ok(Json(changelog))
}

async fn delete_changelog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.storage()?.delete_changelog(&id)?;
    info!(id = %id, "Changelog deleted");

    Ok(StatusCode::NO_CONTENT)
}
