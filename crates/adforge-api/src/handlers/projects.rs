//! Project CRUD handlers. All routes require authentication and a
//! configured store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use adforge_models::{Project, ProjectUpdate};
use adforge_store::ProjectRepository;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn repo(state: &AppState) -> ApiResult<ProjectRepository> {
    state
        .projects()
        .ok_or_else(|| ApiError::unavailable("Database not configured"))
}

/// List the user's projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(repo(&state)?.list_for_user(&user.user_id).await?))
}

/// Save a project.
pub async fn create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut project): Json<Project>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    // The token, not the payload, decides ownership
    project.user_id = user.user_id.clone();
    let stored = repo(&state)?.create(&project).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Fetch one project.
pub async fn get_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    Ok(Json(repo(&state)?.get(&user.user_id, id).await?))
}

/// Patch a project's mutable fields.
pub async fn update_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProjectUpdate>,
) -> ApiResult<Json<Project>> {
    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    Ok(Json(repo(&state)?.update(&user.user_id, id, &patch).await?))
}

/// Delete a project.
pub async fn delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    repo(&state)?.delete(&user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
