//! Storyboard scenes: one beat of the ad with narration and duration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One storyboard beat. Immutable once submitted to generation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Visual description passed to the generation prompt
    #[validate(length(min = 1, message = "scene description must not be empty"))]
    pub description: String,
    /// Target duration in seconds
    #[validate(range(min = 1, message = "duration must be at least 1 second"))]
    pub duration: u32,
    /// Spoken narration; falls back to the description for TTS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
    /// Short visual label shown in storyboard UIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_tag: Option<String>,
    /// Ordered categorization tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Scene {
    pub fn new(description: impl Into<String>, duration: u32) -> Self {
        Self {
            description: description.into(),
            duration,
            narration: None,
            visual_tag: None,
            tags: Vec::new(),
        }
    }

    /// The text spoken over this scene: narration if present, otherwise
    /// the visual description.
    pub fn spoken_text(&self) -> &str {
        match self.narration.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_zero_duration_rejected() {
        let scene = Scene::new("Opening hook", 0);
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_spoken_text_prefers_narration() {
        let mut scene = Scene::new("Opening hook", 10);
        assert_eq!(scene.spoken_text(), "Opening hook");
        scene.narration = Some("What if there was a better way?".to_string());
        assert_eq!(scene.spoken_text(), "What if there was a better way?");
        scene.narration = Some(String::new());
        assert_eq!(scene.spoken_text(), "Opening hook");
    }

    #[test]
    fn test_scene_deserializes_camel_case() {
        let scene: Scene = serde_json::from_str(
            r#"{"description": "Show the problem", "duration": 8, "visualTag": "problem"}"#,
        )
        .unwrap();
        assert_eq!(scene.visual_tag.as_deref(), Some("problem"));
        assert!(scene.tags.is_empty());
    }
}
