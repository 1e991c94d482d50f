//! Script generation handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use adforge_models::{AdBrief, Scene};

use crate::error::ApiResult;
use crate::metrics;
use crate::script;
use crate::state::AppState;

/// Script response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptResponse {
    pub success: bool,
    pub script: String,
    pub scenes: Vec<Scene>,
}

/// Generate an ad script and storyboard from a creative brief.
pub async fn generate_script(
    State(_state): State<AppState>,
    Json(brief): Json<AdBrief>,
) -> ApiResult<Json<ScriptResponse>> {
    brief.validate()?;

    let (script, scenes) = script::synthesize(&brief);
    metrics::record_script_generated(brief.archetype.as_str());

    Ok(Json(ScriptResponse {
        success: true,
        script,
        scenes,
    }))
}
