//! Runway text-to-video client.
//!
//! Runway exposes an asynchronous task API: one POST submits the prompt
//! and returns a task id, then the task endpoint is polled until a
//! terminal status. This client issues single requests only; retry and
//! degradation policy live in the orchestrator.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenMediaError;
use crate::files::download_to_file;
use crate::poller::{TaskOutput, TaskPoll, TaskPoller};

/// Production API base. Note: api.dev.runwayml.com, not api.runwayml.com.
pub const RUNWAY_API_BASE: &str = "https://api.dev.runwayml.com";

/// Generation model identifier.
const RUNWAY_MODEL: &str = "gen4_turbo";

/// 16:9 output.
const RUNWAY_RATIO: &str = "1920:1080";

/// Runway rejects clips longer than this.
pub const MAX_DURATION_SECS: u32 = 10;

/// Timeout for the submit call, which can be slow to accept.
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for status polls.
const POLL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    model: &'static str,
    #[serde(rename = "promptText")]
    prompt_text: &'a str,
    ratio: &'static str,
    duration: u32,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(alias = "task_id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaskStatusResponse {
    status: String,
    #[serde(alias = "result")]
    output: Option<Value>,
    #[serde(alias = "message")]
    error: Option<String>,
}

/// Client for the Runway task API.
pub struct RunwayClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl RunwayClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenMediaError> {
        Self::with_base_url(api_key, RUNWAY_API_BASE)
    }

    /// Point the client at a different base URL, for tests.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenMediaError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GenMediaError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(SUBMIT_TIMEOUT)
            .build()?;
        Ok(Self {
            api_key,
            base_url: base_url.into(),
            http,
        })
    }

    /// Submit a text-to-video task. Duration is clamped to the vendor cap.
    /// Returns the vendor task id for polling.
    pub async fn submit_text_to_video(
        &self,
        prompt: &str,
        duration_secs: u32,
    ) -> Result<String, GenMediaError> {
        let body = SubmitRequest {
            model: RUNWAY_MODEL,
            prompt_text: prompt,
            ratio: RUNWAY_RATIO,
            duration: duration_secs.min(MAX_DURATION_SECS),
        };

        let response = self
            .http
            .post(format!("{}/v1/tasks/text-to-video", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !matches!(status.as_u16(), 200 | 201 | 202) {
            let body = response.text().await.unwrap_or_default();
            return Err(GenMediaError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let submit: SubmitResponse = response.json().await?;
        submit.id.ok_or(GenMediaError::MissingField("id"))
    }

    /// Download a finished asset into `dest`.
    pub async fn download_asset(&self, url: &str, dest: &Path) -> Result<(), GenMediaError> {
        download_to_file(&self.http, url, dest).await?;
        Ok(())
    }
}

impl TaskPoller for RunwayClient {
    async fn poll_task(&self, task_id: &str) -> Result<TaskPoll, GenMediaError> {
        let response = self
            .http
            .get(format!("{}/v1/tasks/{}", self.base_url, task_id))
            .bearer_auth(&self.api_key)
            .timeout(POLL_TIMEOUT)
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

        let task: TaskStatusResponse = response.json().await?;
        match task.status.as_str() {
            "completed" | "succeeded" | "SUCCEEDED" => {
                let url = extract_output_url(task.output.as_ref())
                    .ok_or(GenMediaError::MissingField("output url"))?;
                Ok(TaskPoll::Succeeded(TaskOutput::Url(url)))
            }
            "failed" | "error" | "FAILED" => Ok(TaskPoll::Failed {
                detail: task.error.unwrap_or_else(|| "Unknown error".to_string()),
            }),
            // Anything unrecognized counts as still processing
            _ => Ok(TaskPoll::Processing),
        }
    }
}

/// The completed-task output shows up in a few shapes: a list of URL
/// strings, a list of `{url}` objects, a single `{url}`/`{video_url}`
/// object, or a bare string.
fn extract_output_url(output: Option<&Value>) -> Option<String> {
    let output = output?;
    match output {
        Value::Array(items) => match items.first()? {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(String::from),
            _ => None,
        },
        Value::Object(obj) => obj
            .get("url")
            .or_else(|| obj.get("video_url"))
            .and_then(Value::as_str)
            .map(String::from),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
