//! Durable project records.
//!
//! A project is created by the API layer after the generation core
//! returns; the core itself never persists anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brief::AdBrief;
use crate::scene::Scene;

pub type ProjectId = Uuid;

/// One saved ad project for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: String,
    pub title: String,
    pub brief: AdBrief,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Build a new project from a completed generation.
    pub fn new(user_id: impl Into<String>, brief: AdBrief, scenes: Vec<Scene>) -> Self {
        let now = Utc::now();
        let title = brief.product_name.clone();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title,
            brief,
            scenes,
            script: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Patchable project fields for updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.script.is_none() && self.video_url.is_none()
    }
}
