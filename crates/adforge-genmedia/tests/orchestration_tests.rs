//! End-to-end orchestration tests against stubbed vendor APIs.

use std::time::Duration;

use base64::Engine;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adforge_genmedia::{mock_video_url, GenMediaConfig, Poller, VideoGenerator};
use adforge_models::{AdBrief, Provider, Scene};

fn test_brief() -> AdBrief {
    serde_json::from_value(json!({
        "productName": "TestProduct",
        "description": "A test product"
    }))
    .unwrap()
}

fn test_scene() -> Scene {
    Scene::new("A test product scene", 8)
}

fn fast_poller() -> Poller {
    Poller::new(5, Duration::from_millis(1))
}

fn runway_generator(server: &MockServer) -> VideoGenerator {
    VideoGenerator::new(GenMediaConfig {
        mock_mode: false,
        runway_api_key: Some("rw-key".to_string()),
        ..Default::default()
    })
    .with_poller(fast_poller())
    .with_vendor_base_urls(server.uri(), server.uri(), server.uri())
}

fn stability_generator(server: &MockServer) -> VideoGenerator {
    VideoGenerator::new(GenMediaConfig {
        mock_mode: false,
        stability_api_key: Some("st-key".to_string()),
        ..Default::default()
    })
    .with_poller(fast_poller())
    .with_vendor_base_urls(server.uri(), server.uri(), server.uri())
}

#[tokio::test]
async fn runway_happy_path_downloads_asset() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/tasks/text-to-video"))
        .and(body_string_contains("gen4_turbo"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "task-1"})))
        .expect(1)
        .mount(&server)
        .await;

    // First poll reports running, second reports success
    Mock::given(method("GET"))
        .and(path("/v1/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "running"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "succeeded",
            "output": [format!("{}/assets/result.mp4", server.uri())]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets/result.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"VIDEO".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let video = runway_generator(&server)
        .generate_video_for_scene(&test_scene(), &test_brief(), out.path())
        .await;

    assert!(video.url.starts_with("/videos/testproduct-scene-"));
    assert!(video.url.ends_with(".mp4"));
    assert_eq!(video.provider, Provider::Runway);

    let filename = video.url.strip_prefix("/videos/").unwrap();
    let written = std::fs::read(out.path().join(filename)).unwrap();
    assert_eq!(written, b"VIDEO");
}

#[tokio::test]
async fn runway_failure_degrades_to_placeholder() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/tasks/text-to-video"))
        .respond_with(ResponseTemplate::new(500).set_body_string("vendor down"))
        .expect(1)
        .mount(&server)
        .await;

    let video = runway_generator(&server)
        .generate_video_for_scene(&test_scene(), &test_brief(), out.path())
        .await;

    assert_eq!(video.url, mock_video_url("TestProduct", "A test product scene"));
    // A degraded run is a Mock result, never attributed to the vendor
    assert_eq!(video.provider, Provider::Mock);
}

#[tokio::test]
async fn transport_failure_degrades_to_placeholder() {
    let out = tempfile::tempdir().unwrap();

    // Nothing listens here: every call is a connection error
    let generator = VideoGenerator::new(GenMediaConfig {
        mock_mode: false,
        runway_api_key: Some("rw-key".to_string()),
        ..Default::default()
    })
    .with_poller(fast_poller())
    .with_vendor_base_urls(
        "http://127.0.0.1:1",
        "http://127.0.0.1:1",
        "http://127.0.0.1:1",
    );

    let video = generator
        .generate_video_for_scene(&test_scene(), &test_brief(), out.path())
        .await;

    assert_eq!(video.url, mock_video_url("TestProduct", "A test product scene"));
    assert_eq!(video.provider, Provider::Mock);
}

#[tokio::test]
async fn runway_poll_timeout_degrades_to_placeholder() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/tasks/text-to-video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "task-slow"})))
        .mount(&server)
        .await;
    // Never reaches a terminal status
    Mock::given(method("GET"))
        .and(path("/v1/tasks/task-slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "running"})))
        .expect(5)
        .mount(&server)
        .await;

    let video = runway_generator(&server)
        .generate_video_for_scene(&test_scene(), &test_brief(), out.path())
        .await;

    assert_eq!(video.url, mock_video_url("TestProduct", "A test product scene"));
    assert_eq!(video.provider, Provider::Mock);
}

#[tokio::test]
async fn stability_endpoint_version_fallback_submits_exactly_twice() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    let png_b64 = base64::engine::general_purpose::STANDARD.encode(b"PNGDATA");
    Mock::given(method("POST"))
        .and(path("/v2beta/stable-image/generate/core"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"image": png_b64})))
        .expect(1)
        .mount(&server)
        .await;

    // Current endpoint version is gone; legacy one answers synchronously
    Mock::given(method("POST"))
        .and(path("/v2beta/generation/image-to-video"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1alpha/generation/image-to-video"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"LEGACY-VIDEO".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let video = stability_generator(&server)
        .generate_video_for_scene(&test_scene(), &test_brief(), out.path())
        .await;

    assert!(video.url.starts_with("/videos/testproduct-scene-"));
    assert_eq!(video.provider, Provider::Stability);
    let filename = video.url.strip_prefix("/videos/").unwrap();
    let written = std::fs::read(out.path().join(filename)).unwrap();
    assert_eq!(written, b"LEGACY-VIDEO");
    // Mock expectations assert exactly one submit per endpoint version
}

#[tokio::test]
async fn stability_async_submission_polls_same_version() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    let png_b64 = base64::engine::general_purpose::STANDARD.encode(b"PNGDATA");
    Mock::given(method("POST"))
        .and(path("/v2beta/stable-image/generate/core"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"image": png_b64})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2beta/generation/image-to-video"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "gen-1"})))
        .expect(1)
        .mount(&server)
        .await;

    // Still processing once, then the finished bytes
    Mock::given(method("GET"))
        .and(path("/v2beta/generation/image-to-video/result/gen-1"))
        .respond_with(ResponseTemplate::new(202))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2beta/generation/image-to-video/result/gen-1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ASYNC-VIDEO".to_vec()))
        .mount(&server)
        .await;

    let video = stability_generator(&server)
        .generate_video_for_scene(&test_scene(), &test_brief(), out.path())
        .await;

    let filename = video.url.strip_prefix("/videos/").unwrap();
    let written = std::fs::read(out.path().join(filename)).unwrap();
    assert_eq!(written, b"ASYNC-VIDEO");
}

#[tokio::test]
async fn mock_mode_scenario_is_idempotent() {
    let out = tempfile::tempdir().unwrap();
    let generator = VideoGenerator::new(GenMediaConfig {
        mock_mode: true,
        ..Default::default()
    });

    let scene = test_scene();
    let brief = test_brief();
    let first = generator
        .generate_video_for_scene(&scene, &brief, out.path())
        .await;
    let second = generator
        .generate_video_for_scene(&scene, &brief, out.path())
        .await;

    assert_eq!(first, second);
    assert_eq!(first.provider, Provider::Mock);
    assert!(first.url.to_lowercase().contains("testproduct"));
    assert!(first.url.ends_with(".mp4"));
}

#[tokio::test]
async fn tts_failure_yields_silent_none() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
        .respond_with(ResponseTemplate::new(500).set_body_string("tts down"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(GenMediaConfig {
        mock_mode: true,
        elevenlabs_api_key: Some("el-key".to_string()),
        ..Default::default()
    })
    .with_vendor_base_urls(server.uri(), server.uri(), server.uri());

    let audio = generator
        .generate_audio_for_scene(&test_scene(), out.path())
        .await;
    assert!(audio.is_none());
}

#[tokio::test]
async fn tts_success_writes_audio_file() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"MPEG".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let generator = VideoGenerator::new(GenMediaConfig {
        mock_mode: true,
        elevenlabs_api_key: Some("el-key".to_string()),
        ..Default::default()
    })
    .with_vendor_base_urls(server.uri(), server.uri(), server.uri());

    let mut scene = test_scene();
    scene.narration = Some("What if there was a better way?".to_string());

    let audio_path = generator
        .generate_audio_for_scene(&scene, out.path())
        .await
        .expect("audio path");
    assert!(audio_path.ends_with(".mp3"));
    assert_eq!(std::fs::read(&audio_path).unwrap(), b"MPEG");
}
