//! Application state.

use std::sync::Arc;

use tracing::{info, warn};

use adforge_genmedia::{GenMediaConfig, VideoGenerator};
use adforge_store::{
    ProjectRepository, SubscriptionRepository, SupabaseClient, UsageRepository,
};

use crate::auth::TokenVerifier;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub generator: Arc<VideoGenerator>,
    /// `None` in development mode without Supabase credentials.
    pub store: Option<Arc<SupabaseClient>>,
    /// `None` when `SUPABASE_JWT_SECRET` is not set.
    pub verifier: Option<Arc<TokenVerifier>>,
}

impl AppState {
    /// Create new application state from the environment.
    pub fn from_env(config: ApiConfig) -> Result<Self, anyhow::Error> {
        let genmedia = GenMediaConfig::from_env();
        if genmedia.mock_mode {
            info!("video generation running in mock mode");
        }
        let generator = Arc::new(VideoGenerator::new(genmedia));

        let store = SupabaseClient::from_env()?.map(Arc::new);
        if store.is_none() {
            warn!("Supabase not configured, running without persistence");
        }

        let verifier = TokenVerifier::from_env().map(Arc::new);
        if verifier.is_none() {
            warn!("SUPABASE_JWT_SECRET not set, authentication disabled");
        }

        std::fs::create_dir_all(&config.videos_dir)?;

        Ok(Self {
            config,
            generator,
            store,
            verifier,
        })
    }

    /// Build state from parts, mainly for tests.
    pub fn new(
        config: ApiConfig,
        generator: Arc<VideoGenerator>,
        store: Option<Arc<SupabaseClient>>,
        verifier: Option<Arc<TokenVerifier>>,
    ) -> Self {
        Self {
            config,
            generator,
            store,
            verifier,
        }
    }

    pub fn projects(&self) -> Option<ProjectRepository> {
        self.store
            .as_ref()
            .map(|c| ProjectRepository::new((**c).clone()))
    }

    pub fn subscriptions(&self) -> Option<SubscriptionRepository> {
        self.store
            .as_ref()
            .map(|c| SubscriptionRepository::new((**c).clone()))
    }

    pub fn usage(&self) -> Option<UsageRepository> {
        self.store
            .as_ref()
            .map(|c| UsageRepository::new((**c).clone()))
    }
}
