//! Bounded polling for asynchronous vendor tasks.

use std::time::Duration;

use tracing::debug;

use crate::error::GenMediaError;

/// Default attempt ceiling: 60 polls.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Default fixed interval between polls: 5 seconds.
/// Together with the ceiling this bounds a wait at 5 minutes wall-clock.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Result payload of a completed task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutput {
    /// A downloadable asset URL (Runway-style vendors)
    Url(String),
    /// Raw media bytes returned inline (Stability-style vendors)
    Media(Vec<u8>),
}

/// One status observation from a vendor.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPoll {
    /// Not finished; includes unrecognized vendor statuses
    Processing,
    Succeeded(TaskOutput),
    Failed { detail: String },
}

/// Terminal outcome of a bounded wait.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Succeeded(TaskOutput),
    Failed { detail: String },
    /// Attempt ceiling reached. A normal outcome, not an error: the
    /// orchestrator decides whether to degrade.
    TimedOut,
}

/// Seam for status checks so tests can substitute stub providers.
pub trait TaskPoller {
    fn poll_task(
        &self,
        task_id: &str,
    ) -> impl std::future::Future<Output = Result<TaskPoll, GenMediaError>> + Send;
}

/// Fixed-interval bounded retry loop.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    max_attempts: u32,
    interval: Duration,
}

impl Default for Poller {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Poller {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Hard wall-clock bound on a wait: ceiling times interval.
    pub fn wall_clock_bound(&self) -> Duration {
        self.interval * self.max_attempts
    }

    /// Await task completion, polling at a fixed interval.
    ///
    /// Exits the moment the vendor reports a terminal success or failure.
    /// Indeterminate statuses keep polling until the attempt ceiling, at
    /// which point the outcome is [`PollOutcome::TimedOut`]. Errors from
    /// the status check itself (transport, provider) propagate to the
    /// caller; they are not retried here.
    ///
    /// The wait is a plain future: dropping it cancels the loop mid-sleep
    /// without leaking anything.
    pub async fn await_completion(
        &self,
        client: &impl TaskPoller,
        task_id: &str,
    ) -> Result<PollOutcome, GenMediaError> {
        for attempt in 1..=self.max_attempts {
            tokio::time::sleep(self.interval).await;

            match client.poll_task(task_id).await? {
                TaskPoll::Processing => {
                    debug!(task_id, attempt, max = self.max_attempts, "still processing");
                }
                TaskPoll::Succeeded(output) => {
                    debug!(task_id, attempt, "task succeeded");
                    return Ok(PollOutcome::Succeeded(output));
                }
                TaskPoll::Failed { detail } => {
                    debug!(task_id, attempt, %detail, "task failed");
                    return Ok(PollOutcome::Failed { detail });
                }
            }
        }

        debug!(task_id, attempts = self.max_attempts, "polling ceiling reached");
        Ok(PollOutcome::TimedOut)
    }
}
