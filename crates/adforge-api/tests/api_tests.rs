//! Router-level tests using `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use adforge_api::auth::TokenVerifier;
use adforge_api::{create_router, ApiConfig, AppState};
use adforge_genmedia::{GenMediaConfig, VideoGenerator};

fn test_state(videos_dir: &std::path::Path, verifier: Option<TokenVerifier>) -> AppState {
    let config = ApiConfig {
        videos_dir: videos_dir.to_path_buf(),
        ..Default::default()
    };
    let generator = Arc::new(VideoGenerator::new(GenMediaConfig {
        mock_mode: true,
        ..Default::default()
    }));
    AppState::new(config, generator, None, verifier.map(Arc::new))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_brief() -> Value {
    json!({
        "productName": "TestProduct",
        "description": "A test product",
        "mood": 80,
        "energy": 30,
        "style": "cinematic",
        "archetype": "problem-solution"
    })
}

#[tokio::test]
async fn health_endpoints_respond() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["video_generation"], "ready");
}

#[tokio::test]
async fn generate_script_returns_six_scenes() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let response = app
        .oneshot(json_request("POST", "/api/generate-script", sample_brief()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["scenes"].as_array().unwrap().len(), 6);
    let script = body["script"].as_str().unwrap();
    assert!(script.contains("CINEMATIC STYLE"));
    assert!(script.contains("TestProduct"));
}

#[tokio::test]
async fn generate_script_rejects_empty_product_name() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/generate-script",
            json!({"productName": "", "description": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_video_in_mock_mode_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let request_body = json!({
        "scenes": [
            {"description": "Opening hook scene", "duration": 10,
             "narration": "What if there was a better way?"}
        ],
        "adBrief": sample_brief()
    });

    let first = body_json(
        app.clone()
            .oneshot(json_request("POST", "/api/generate-video", request_body.clone()))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(json_request("POST", "/api/generate-video", request_body))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["success"], true);
    assert_eq!(first["videoUrl"], second["videoUrl"]);
    assert_eq!(first["hookScore"], second["hookScore"]);
    let url = first["videoUrl"].as_str().unwrap();
    assert!(url.starts_with("/videos/testproduct-scene-"));
    assert!(url.ends_with(".mp4"));
}

#[tokio::test]
async fn generate_video_rejects_empty_storyboard() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/generate-video",
            json!({"scenes": [], "adBrief": sample_brief()}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_video_rejects_zero_duration_scene() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/generate-video",
            json!({
                "scenes": [{"description": "beat", "duration": 0}],
                "adBrief": sample_brief()
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn catalogs_list_all_options() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let archetypes = body_json(
        app.clone()
            .oneshot(Request::get("/api/archetypes").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(archetypes["archetypes"].as_array().unwrap().len(), 6);

    let styles = body_json(
        app.oneshot(Request::get("/api/styles").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(styles["styles"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn protected_routes_answer_503_without_auth_configured() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let response = app
        .oneshot(Request::get("/api/projects").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn protected_routes_answer_401_without_token() {
    let dir = tempfile::tempdir().unwrap();
    let verifier = TokenVerifier::new("test-secret");
    let app = create_router(test_state(dir.path(), Some(verifier)), None);

    let response = app
        .oneshot(Request::get("/api/usage").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_bearer_token_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let verifier = TokenVerifier::new("test-secret");
    let app = create_router(test_state(dir.path(), Some(verifier)), None);

    let response = app
        .oneshot(
            Request::get("/api/projects")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn generated_media_is_served_statically() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("clip.mp4"), b"VIDEO").unwrap();
    let app = create_router(test_state(dir.path(), None), None);

    let response = app
        .oneshot(Request::get("/videos/clip.mp4").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"VIDEO");
}
