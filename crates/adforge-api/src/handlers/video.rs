//! Video generation handler.
//!
//! This is the endpoint the generation core serves: it validates the
//! storyboard, enforces the monthly quota when a user and a store are
//! present, and invokes the orchestrator. The orchestrator never
//! hard-fails, so the only error responses here come from validation and
//! quota, never from vendors.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use adforge_models::{AdBrief, ApiUsageRecord, Project, Provider, Scene};

use crate::auth::{AuthUser, MaybeUser};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Estimated vendor cost per second of generated video, in USD.
const VIDEO_COST_PER_SECOND: f64 = 0.05;
/// Estimated TTS cost per character of narration, in USD.
const TTS_COST_PER_CHAR: f64 = 0.0003;

/// Video generation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    pub scenes: Vec<Scene>,
    pub ad_brief: AdBrief,
}

/// Video generation response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub success: bool,
    pub video_url: String,
    pub hook_score: u8,
}

/// Generate video for a storyboard.
pub async fn generate_video(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(request): Json<VideoRequest>,
) -> ApiResult<Json<VideoResponse>> {
    if request.scenes.is_empty() {
        return Err(ApiError::bad_request("Scenes are required"));
    }
    request.ad_brief.validate()?;
    for scene in &request.scenes {
        scene.validate()?;
    }

    // Quota gate only applies when both auth and persistence are configured
    if let (Some(user), Some(subscriptions)) = (&user, state.subscriptions()) {
        subscriptions.check_video_allowed(&user.user_id).await?;
    }

    let brief = &request.ad_brief;
    let first_scene = &request.scenes[0];
    let started = Instant::now();

    let video = state
        .generator
        .generate_video_for_scene(first_scene, brief, &state.config.videos_dir)
        .await;
    let video_url = video.url;
    // Degraded runs report Mock, so vendor cost is only attributed when
    // a vendor actually produced the asset
    let provider = video.provider;

    let audio_path = state
        .generator
        .generate_audio_for_scene(first_scene, &state.config.videos_dir)
        .await;
    if let Some(path) = &audio_path {
        info!(path, "narration audio generated");
    }

    metrics::record_video_generated(provider.as_str(), started.elapsed().as_secs_f64());

    let hook_score = hook_score(&request.scenes);

    if let Some(user) = &user {
        record_generation(&state, user, &request, &video_url, audio_path.as_deref(), provider)
            .await;
    }

    info!(
        product = %brief.product_name,
        provider = %provider,
        video_url,
        hook_score,
        "video generation complete"
    );

    Ok(Json(VideoResponse {
        success: true,
        video_url,
        hook_score,
    }))
}

/// Persist the project, count quota usage, and record vendor costs.
/// All best-effort: a generation that succeeded is never failed by
/// bookkeeping.
async fn record_generation(
    state: &AppState,
    user: &AuthUser,
    request: &VideoRequest,
    video_url: &str,
    audio_path: Option<&str>,
    provider: Provider,
) {
    let Some(projects) = state.projects() else {
        return;
    };

    let mut project = Project::new(
        &user.user_id,
        request.ad_brief.clone(),
        request.scenes.clone(),
    );
    project.video_url = Some(video_url.to_string());

    let project_id = match projects.create(&project).await {
        Ok(stored) => Some(stored.id.to_string()),
        Err(err) => {
            warn!(error = %err, "failed to persist project");
            None
        }
    };

    // Placeholder results consumed no vendor capacity: no quota
    // increment and no cost row
    if provider != Provider::Mock {
        if let Some(subscriptions) = state.subscriptions() {
            subscriptions.increment_usage(&user.user_id).await;
        }
    }

    let Some(usage) = state.usage() else {
        return;
    };

    let first_scene = &request.scenes[0];
    if provider != Provider::Mock {
        let seconds = f64::from(first_scene.duration);
        usage
            .track(&ApiUsageRecord {
                user_id: user.user_id.clone(),
                project_id: project_id.clone(),
                service: provider.as_str().to_string(),
                operation: "video_generation".to_string(),
                units_consumed: seconds,
                cost_usd: seconds * VIDEO_COST_PER_SECOND,
                metadata: serde_json::json!({ "videoUrl": video_url }),
                created_at: None,
            })
            .await;
    }

    if audio_path.is_some() {
        let chars = first_scene.spoken_text().chars().count() as f64;
        usage
            .track(&ApiUsageRecord {
                user_id: user.user_id.clone(),
                project_id,
                service: "elevenlabs".to_string(),
                operation: "audio_generation".to_string(),
                units_consumed: chars,
                cost_usd: chars * TTS_COST_PER_CHAR,
                metadata: serde_json::Value::Null,
                created_at: None,
            })
            .await;
    }
}

/// Storyboard quality heuristic, deterministic for a given input.
fn hook_score(scenes: &[Scene]) -> u8 {
    let mut score = 70 + (scenes.len() as u32 * 3).min(15);
    if scenes.len() >= 6 {
        // Bonus for a complete storyboard
        score += 5;
    }
    if scenes
        .first()
        .is_some_and(|s| s.narration.as_deref().is_some_and(|n| !n.is_empty()))
    {
        score += 5;
    }
    score.min(100) as u8
}
