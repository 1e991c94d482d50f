//! In-flight generation task state.
//!
//! A `GenerationTask` exists only for the duration of one generation call;
//! durable records are a store concern (`Project`), never this type.

use serde::{Deserialize, Serialize};

/// Which backend produced (or will produce) the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Deterministic placeholder, no network call
    Mock,
    /// Runway text-to-video
    Runway,
    /// Stability image + image-to-video pipeline
    Stability,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Mock => "mock",
            Provider::Runway => "runway",
            Provider::Stability => "stability",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Submitted, not yet picked up by the vendor
    #[default]
    Pending,
    /// Vendor reports work in progress
    Processing,
    /// Asset ready
    Succeeded,
    /// Vendor-declared failure
    Failed,
    /// Polling ceiling reached without a terminal vendor status
    TimedOut,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
            TaskStatus::TimedOut => "timed_out",
        }
    }

    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Succeeded | TaskStatus::Failed | TaskStatus::TimedOut
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of one generation request against one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationTask {
    pub provider: Provider,
    /// Vendor-assigned task id, absent for synchronous responses
    pub external_task_id: Option<String>,
    pub status: TaskStatus,
    pub result_url: Option<String>,
    pub error_detail: Option<String>,
}

impl GenerationTask {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            external_task_id: None,
            status: TaskStatus::Pending,
            result_url: None,
            error_detail: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Transition the task. Terminal states are sticky: once succeeded,
    /// failed, or timed out, further transitions are ignored.
    pub fn set_status(&mut self, status: TaskStatus) {
        if self.is_terminal() {
            return;
        }
        self.status = status;
    }

    pub fn succeed(&mut self, result_url: impl Into<String>) {
        if self.is_terminal() {
            return;
        }
        self.status = TaskStatus::Succeeded;
        self.result_url = Some(result_url.into());
    }

    pub fn fail(&mut self, detail: impl Into<String>) {
        if self.is_terminal() {
            return;
        }
        self.status = TaskStatus::Failed;
        self.error_detail = Some(detail.into());
    }

    pub fn time_out(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.status = TaskStatus::TimedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending() {
        let task = GenerationTask::new(Provider::Runway);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.is_terminal());
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        let mut task = GenerationTask::new(Provider::Runway);
        task.succeed("https://example.com/video.mp4");
        assert_eq!(task.status, TaskStatus::Succeeded);

        // Every transition attempt out of a terminal state is ignored
        task.fail("late failure");
        assert_eq!(task.status, TaskStatus::Succeeded);
        assert!(task.error_detail.is_none());

        task.time_out();
        assert_eq!(task.status, TaskStatus::Succeeded);

        task.set_status(TaskStatus::Processing);
        assert_eq!(task.status, TaskStatus::Succeeded);
    }

    #[test]
    fn test_timed_out_is_terminal() {
        let mut task = GenerationTask::new(Provider::Stability);
        task.set_status(TaskStatus::Processing);
        task.time_out();
        assert!(task.is_terminal());
        task.succeed("https://example.com/late.mp4");
        assert_eq!(task.status, TaskStatus::TimedOut);
        assert!(task.result_url.is_none());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&TaskStatus::TimedOut).unwrap();
        assert_eq!(json, r#""timed_out""#);
    }
}
