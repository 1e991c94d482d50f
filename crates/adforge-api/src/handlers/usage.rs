//! Usage reporting handler.

use axum::extract::State;
use axum::Json;

use adforge_models::UsageSummary;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Month-to-date usage and cost for the authenticated user.
pub async fn get_usage(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<UsageSummary>> {
    let usage = state
        .usage()
        .ok_or_else(|| ApiError::unavailable("Database not configured"))?;
    Ok(Json(usage.monthly_usage(&user.user_id).await?))
}
