//! Stability image + image-to-video client.
//!
//! Stability has no direct text-to-video endpoint; video generation is a
//! two-step pipeline: text-to-image, then image-to-video. The
//! image-to-video operation is served under two endpoint versions
//! (`v2beta` current, `v1alpha` legacy); submits try the current version
//! first and fall back to the legacy one exactly once on a 404. Result
//! polls must reuse whichever version accepted the submit.

use std::time::Duration;

use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use crate::error::GenMediaError;
use crate::poller::{TaskOutput, TaskPoll, TaskPoller};

/// Production API base.
pub const STABILITY_API_BASE: &str = "https://api.stability.ai";

/// Timeout for image generation.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for video submits, which upload the source image.
const VIDEO_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for result polls.
const POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// Motion parameters pinned to the vendor's documented defaults.
const CFG_SCALE: &str = "1.8";
const MOTION_BUCKET_ID: &str = "127";
const SEED: &str = "0";

/// Endpoint version for the image-to-video operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointVersion {
    /// Current
    V2Beta,
    /// Legacy fallback
    V1Alpha,
}

impl EndpointVersion {
    pub fn path_segment(&self) -> &'static str {
        match self {
            EndpointVersion::V2Beta => "v2beta",
            EndpointVersion::V1Alpha => "v1alpha",
        }
    }
}

/// Outcome of an image-to-video submit.
#[derive(Debug)]
pub enum Submission {
    /// Synchronous response: the video came back inline.
    Ready(Vec<u8>),
    /// Asynchronous response: poll the result endpoint with this id,
    /// using the endpoint version that accepted the submit.
    Accepted {
        id: String,
        version: EndpointVersion,
    },
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AcceptedResponse {
    id: Option<String>,
}

/// Client for the Stability REST API.
pub struct StabilityClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl StabilityClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenMediaError> {
        Self::with_base_url(api_key, STABILITY_API_BASE)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenMediaError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GenMediaError::MissingApiKey);
        }
        let http = reqwest::Client::builder().timeout(VIDEO_TIMEOUT).build()?;
        Ok(Self {
            api_key,
            base_url: base_url.into(),
            http,
        })
    }

    /// Generate a 16:9 still image from a text prompt. The response
    /// carries the PNG base64-encoded in JSON.
    pub async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, GenMediaError> {
        let form = reqwest::multipart::Form::new()
            .text("prompt", prompt.to_string())
            .text("output_format", "png")
            .text("aspect_ratio", "16:9");

        let response = self
            .http
            .post(format!(
                "{}/v2beta/stable-image/generate/core",
                self.base_url
            ))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .multipart(form)
            .timeout(IMAGE_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenMediaError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let image: ImageResponse = response.json().await?;
        let encoded = image.image.ok_or(GenMediaError::MissingField("image"))?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| GenMediaError::InvalidPayload(format!("bad image base64: {e}")))
    }

    /// Submit an image-to-video task, falling back from the current
    /// endpoint version to the legacy one exactly once on a 404.
    pub async fn submit_image_to_video(
        &self,
        image_png: &[u8],
    ) -> Result<Submission, GenMediaError> {
        let first = self
            .submit_image_to_video_versioned(image_png, EndpointVersion::V2Beta)
            .await;

        match first {
            Err(GenMediaError::Provider { status: 404, .. }) => {
                debug!("image-to-video v2beta not found, retrying against v1alpha");
                self.submit_image_to_video_versioned(image_png, EndpointVersion::V1Alpha)
                    .await
            }
            other => other,
        }
    }

    async fn submit_image_to_video_versioned(
        &self,
        image_png: &[u8],
        version: EndpointVersion,
    ) -> Result<Submission, GenMediaError> {
        let part = reqwest::multipart::Part::bytes(image_png.to_vec())
            .file_name("scene.png")
            .mime_str("image/png")
            .map_err(|e| GenMediaError::InvalidPayload(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("seed", SEED)
            .text("cfg_scale", CFG_SCALE)
            .text("motion_bucket_id", MOTION_BUCKET_ID);

        let response = self
            .http
            .post(format!(
                "{}/{}/generation/image-to-video",
                self.base_url,
                version.path_segment()
            ))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await?;

        match response.status().as_u16() {
            // Synchronous completion
            200 => Ok(Submission::Ready(response.bytes().await?.to_vec())),
            // Accepted for asynchronous processing
            202 => {
                let accepted: AcceptedResponse = response.json().await?;
                let id = accepted.id.ok_or(GenMediaError::MissingField("id"))?;
                Ok(Submission::Accepted { id, version })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GenMediaError::Provider { status, body })
            }
        }
    }

    /// A poller bound to the endpoint version the submit landed on.
    pub fn result_poller(&self, version: EndpointVersion) -> StabilityResultPoller<'_> {
        StabilityResultPoller {
            client: self,
            version,
        }
    }
}

/// Polls the image-to-video result endpoint for one submission.
pub struct StabilityResultPoller<'a> {
    client: &'a StabilityClient,
    version: EndpointVersion,
}

impl TaskPoller for StabilityResultPoller<'_> {
    async fn poll_task(&self, task_id: &str) -> Result<TaskPoll, GenMediaError> {
        let response = self
            .client
            .http
            .get(format!(
                "{}/{}/generation/image-to-video/result/{}",
                self.client.base_url,
                self.version.path_segment(),
                task_id
            ))
            .bearer_auth(&self.client.api_key)
            .header("Accept", "video/*")
            .timeout(POLL_TIMEOUT)
            .send()
            .await?;

        match response.status().as_u16() {
            200 => Ok(TaskPoll::Succeeded(TaskOutput::Media(
                response.bytes().await?.to_vec(),
            ))),
            202 => Ok(TaskPoll::Processing),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GenMediaError::Provider { status, body })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            StabilityClient::new(""),
            Err(GenMediaError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_version_paths() {
        assert_eq!(EndpointVersion::V2Beta.path_segment(), "v2beta");
        assert_eq!(EndpointVersion::V1Alpha.path_segment(), "v1alpha");
    }

    #[test]
    fn test_image_response_deserialization() {
        let r: ImageResponse = serde_json::from_str(r#"{"image": "aGVsbG8="}"#).unwrap();
        assert_eq!(r.image.as_deref(), Some("aGVsbG8="));
        let r: ImageResponse = serde_json::from_str(r#"{"finish_reason": "SUCCESS"}"#).unwrap();
        assert!(r.image.is_none());
    }
}
