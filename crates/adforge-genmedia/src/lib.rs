//! Generative-media clients and fallback orchestration.
//!
//! This crate is the generation core of the AdForge backend:
//! - Per-vendor HTTP clients ([`RunwayClient`], [`StabilityClient`],
//!   [`ElevenLabsClient`]) that shape requests and parse responses
//! - A bounded [`Poller`] that awaits asynchronous vendor task completion
//! - A deterministic [`mock`] placeholder that never fails
//! - The [`VideoGenerator`] orchestrator that picks a provider from
//!   injected configuration and degrades to the placeholder on any failure
//!
//! Video generation never hard-fails the caller; audio generation returns
//! `None` instead of an error. Both policies are deliberate.

pub mod error;
pub mod files;
pub mod mock;
pub mod orchestrator;
pub mod poller;
pub mod runway;
pub mod stability;
pub mod tts;

pub use error::GenMediaError;
pub use mock::mock_video_url;
pub use orchestrator::{GenMediaConfig, GeneratedVideo, VideoGenerator};
pub use poller::{PollOutcome, Poller, TaskOutput, TaskPoll, TaskPoller};
pub use runway::RunwayClient;
pub use stability::{EndpointVersion, StabilityClient, Submission};
pub use tts::ElevenLabsClient;
