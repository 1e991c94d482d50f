//! Provider selection and degrade-to-mock orchestration.
//!
//! Provider policy, in order:
//! 1. Mock mode on, or no vendor credential → deterministic placeholder,
//!    no network call.
//! 2. Runway credential present → text-to-video submit + poll + download.
//! 3. Stability credential present → image generation, then image-to-video
//!    (two sequential sub-calls, both behind the endpoint-version fallback).
//! 4. Any error or timeout from 2-3 → log it and return the placeholder.
//!
//! The fallible vendor path is [`VideoGenerator::try_generate`]; the
//! public facade applies the degrade policy one level up, so the
//! degrade-vs-surface decision stays testable on its own.

use std::path::Path;

use tracing::{info, warn};

use adforge_models::{AdBrief, GenerationTask, Provider, Scene};

use crate::error::GenMediaError;
use crate::files::{audio_filename, unique_video_filename, write_media_file};
use crate::mock::mock_video_url;
use crate::poller::{PollOutcome, Poller, TaskOutput};
use crate::runway::{RunwayClient, RUNWAY_API_BASE};
use crate::stability::{StabilityClient, Submission, STABILITY_API_BASE};
use crate::tts::{ElevenLabsClient, ELEVENLABS_API_BASE};

/// Credentials and mode for the generation core.
///
/// Built once at startup and injected; nothing in this crate reads the
/// process environment at call time, so tests construct this directly.
#[derive(Debug, Clone, Default)]
pub struct GenMediaConfig {
    /// When set, no vendor is ever called.
    pub mock_mode: bool,
    pub runway_api_key: Option<String>,
    pub stability_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
}

impl GenMediaConfig {
    /// Read configuration from the environment. Mock mode defaults to on
    /// so a bare checkout works without any credentials.
    pub fn from_env() -> Self {
        Self {
            mock_mode: std::env::var("USE_MOCK_VIDEO")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(true),
            runway_api_key: non_empty(std::env::var("RUNWAY_API_KEY").ok()),
            stability_api_key: non_empty(std::env::var("STABILITY_API_KEY").ok()),
            elevenlabs_api_key: non_empty(std::env::var("ELEVENLABS_API_KEY").ok()),
        }
    }

    /// Whether any video vendor credential is configured.
    pub fn has_video_credential(&self) -> bool {
        self.runway_api_key.is_some() || self.stability_api_key.is_some()
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// A produced video asset and the provider that actually produced it.
///
/// `provider` is [`Provider::Mock`] whenever the result is the
/// placeholder, including degraded vendor runs; callers can attribute
/// vendor cost only when a vendor really delivered the asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideo {
    pub url: String,
    pub provider: Provider,
}

/// The generation gateway invoked by the HTTP layer.
pub struct VideoGenerator {
    config: GenMediaConfig,
    poller: Poller,
    runway_base: String,
    stability_base: String,
    tts_base: String,
}

impl VideoGenerator {
    pub fn new(config: GenMediaConfig) -> Self {
        Self {
            config,
            poller: Poller::default(),
            runway_base: RUNWAY_API_BASE.to_string(),
            stability_base: STABILITY_API_BASE.to_string(),
            tts_base: ELEVENLABS_API_BASE.to_string(),
        }
    }

    /// Override the polling bound, mainly for tests.
    pub fn with_poller(mut self, poller: Poller) -> Self {
        self.poller = poller;
        self
    }

    /// Point every vendor at a different base URL, for tests.
    pub fn with_vendor_base_urls(
        mut self,
        runway: impl Into<String>,
        stability: impl Into<String>,
        tts: impl Into<String>,
    ) -> Self {
        self.runway_base = runway.into();
        self.stability_base = stability.into();
        self.tts_base = tts.into();
        self
    }

    /// Generate video for one scene. Never fails: every vendor error,
    /// timeout, or transport failure degrades to the deterministic
    /// placeholder URL, reported as a [`Provider::Mock`] result.
    pub async fn generate_video_for_scene(
        &self,
        scene: &Scene,
        brief: &AdBrief,
        output_dir: &Path,
    ) -> GeneratedVideo {
        if self.config.mock_mode || !self.config.has_video_credential() {
            return GeneratedVideo {
                url: self.placeholder_url(scene, brief),
                provider: Provider::Mock,
            };
        }

        match self.try_generate(scene, brief, output_dir).await {
            Ok(url) => GeneratedVideo {
                url,
                provider: self.active_provider(),
            },
            Err(err) => {
                // Degrade policy: availability over fidelity. The caller
                // always gets a usable URL.
                warn!(
                    error = %err,
                    kind = err.kind(),
                    product = %brief.product_name,
                    "video generation failed, degrading to placeholder"
                );
                GeneratedVideo {
                    url: self.placeholder_url(scene, brief),
                    provider: Provider::Mock,
                }
            }
        }
    }

    /// The placeholder this generator degrades to.
    pub fn placeholder_url(&self, scene: &Scene, brief: &AdBrief) -> String {
        mock_video_url(&brief.product_name, &scene.description)
    }

    /// The provider the selection policy would route video generation to.
    pub fn active_provider(&self) -> Provider {
        if self.config.mock_mode {
            Provider::Mock
        } else if self.config.runway_api_key.is_some() {
            Provider::Runway
        } else if self.config.stability_api_key.is_some() {
            Provider::Stability
        } else {
            Provider::Mock
        }
    }

    /// The fallible vendor path. Exposed so the degrade-vs-surface
    /// decision can be tested apart from the policy in
    /// [`generate_video_for_scene`].
    pub async fn try_generate(
        &self,
        scene: &Scene,
        brief: &AdBrief,
        output_dir: &Path,
    ) -> Result<String, GenMediaError> {
        let prompt = scene_prompt(scene, brief);

        if let Some(key) = &self.config.runway_api_key {
            return self
                .generate_with_runway(key, &prompt, scene, brief, output_dir)
                .await;
        }
        if let Some(key) = &self.config.stability_api_key {
            return self
                .generate_with_stability(key, &prompt, brief, output_dir)
                .await;
        }

        // Selection policy guarantees a credential before this path; an
        // empty config still resolves to the placeholder.
        Ok(self.placeholder_url(scene, brief))
    }

    async fn generate_with_runway(
        &self,
        api_key: &str,
        prompt: &str,
        scene: &Scene,
        brief: &AdBrief,
        output_dir: &Path,
    ) -> Result<String, GenMediaError> {
        let client = RunwayClient::with_base_url(api_key, &self.runway_base)?;
        let mut task = GenerationTask::new(Provider::Runway);

        info!(product = %brief.product_name, "submitting Runway text-to-video task");
        let task_id = client.submit_text_to_video(prompt, scene.duration).await?;
        task.external_task_id = Some(task_id.clone());
        task.set_status(adforge_models::TaskStatus::Processing);

        match self.poller.await_completion(&client, &task_id).await? {
            PollOutcome::Succeeded(TaskOutput::Url(url)) => {
                info!(task_id, "Runway task complete, downloading asset");
                let filename = unique_video_filename(&brief.product_name);
                client
                    .download_asset(&url, &output_dir.join(&filename))
                    .await?;
                task.succeed(format!("/videos/{filename}"));
                Ok(format!("/videos/{filename}"))
            }
            PollOutcome::Succeeded(TaskOutput::Media(bytes)) => {
                let filename = unique_video_filename(&brief.product_name);
                write_media_file(output_dir, &filename, &bytes).await?;
                task.succeed(format!("/videos/{filename}"));
                Ok(format!("/videos/{filename}"))
            }
            PollOutcome::Failed { detail } => {
                task.fail(detail.clone());
                Err(GenMediaError::TaskFailed(detail))
            }
            PollOutcome::TimedOut => {
                task.time_out();
                Err(GenMediaError::PollTimedOut)
            }
        }
    }

    async fn generate_with_stability(
        &self,
        api_key: &str,
        prompt: &str,
        brief: &AdBrief,
        output_dir: &Path,
    ) -> Result<String, GenMediaError> {
        let client = StabilityClient::with_base_url(api_key, &self.stability_base)?;
        let mut task = GenerationTask::new(Provider::Stability);

        info!(product = %brief.product_name, "generating Stability source image");
        let image = client.generate_image(prompt).await?;

        info!("converting image to video");
        let video_bytes = match client.submit_image_to_video(&image).await? {
            Submission::Ready(bytes) => bytes,
            Submission::Accepted { id, version } => {
                task.external_task_id = Some(id.clone());
                task.set_status(adforge_models::TaskStatus::Processing);
                let poller = client.result_poller(version);
                match self.poller.await_completion(&poller, &id).await? {
                    PollOutcome::Succeeded(TaskOutput::Media(bytes)) => bytes,
                    PollOutcome::Succeeded(TaskOutput::Url(url)) => {
                        // Result endpoint hands back bytes; a URL here
                        // means the contract changed under us.
                        return Err(GenMediaError::InvalidPayload(format!(
                            "unexpected URL result: {url}"
                        )));
                    }
                    PollOutcome::Failed { detail } => {
                        task.fail(detail.clone());
                        return Err(GenMediaError::TaskFailed(detail));
                    }
                    PollOutcome::TimedOut => {
                        task.time_out();
                        return Err(GenMediaError::PollTimedOut);
                    }
                }
            }
        };

        let filename = unique_video_filename(&brief.product_name);
        write_media_file(output_dir, &filename, &video_bytes).await?;
        task.succeed(format!("/videos/{filename}"));
        Ok(format!("/videos/{filename}"))
    }

    /// Generate narration audio for a scene.
    ///
    /// Silent-null policy: no TTS credential, empty narration, or any
    /// vendor failure yields `None`, never an error. Returns the written
    /// file path on success.
    pub async fn generate_audio_for_scene(
        &self,
        scene: &Scene,
        output_dir: &Path,
    ) -> Option<String> {
        let narration = scene.spoken_text();
        if narration.is_empty() {
            return None;
        }

        let api_key = self.config.elevenlabs_api_key.as_deref()?;
        let client = match ElevenLabsClient::with_base_url(api_key, &self.tts_base) {
            Ok(c) => c,
            Err(err) => {
                warn!(error = %err, "TTS client unavailable, skipping audio");
                return None;
            }
        };

        match client.synthesize(narration).await {
            Ok(bytes) => {
                let filename = audio_filename(&scene.description);
                match write_media_file(output_dir, &filename, &bytes).await {
                    Ok(path) => Some(path.to_string_lossy().into_owned()),
                    Err(err) => {
                        warn!(error = %err, "failed to write audio file, skipping audio");
                        None
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "TTS synthesis failed, skipping audio");
                None
            }
        }
    }
}

/// Prompt shaping shared by both video vendors.
fn scene_prompt(scene: &Scene, brief: &AdBrief) -> String {
    format!(
        "{}. Style: {}, professional, high quality",
        scene.description, brief.style
    )
}
