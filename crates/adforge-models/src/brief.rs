//! Ad brief: the structured creative input describing a product, tone,
//! and desired call-to-action.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Creative brief submitted by the client.
///
/// Validated at the HTTP boundary; invalid briefs never reach the
/// generation core.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdBrief {
    /// Product or brand name
    #[validate(length(min = 1, message = "product name must not be empty"))]
    pub product_name: String,
    /// Free-form product description
    #[validate(length(min = 1, max = 5000, message = "description must be 1-5000 characters"))]
    pub description: String,
    /// Emotional tone, 0 (calm) to 100 (exciting)
    #[validate(range(min = 0, max = 100))]
    #[serde(default = "default_midpoint")]
    pub mood: u8,
    /// Pacing, 0 (slow) to 100 (fast)
    #[validate(range(min = 0, max = 100))]
    #[serde(default = "default_midpoint")]
    pub energy: u8,
    /// Visual style for generated footage
    #[serde(default)]
    pub style: AdStyle,
    /// Narrative template for the script
    #[serde(default)]
    pub archetype: Archetype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
}

fn default_midpoint() -> u8 {
    50
}

impl AdBrief {
    /// Tone word derived from the mood slider, used in script synthesis.
    pub fn tone_word(&self) -> &'static str {
        if self.mood > 60 {
            "exciting"
        } else if self.mood < 40 {
            "calm"
        } else {
            "balanced"
        }
    }

    /// Pacing word derived from the energy slider.
    pub fn pace_word(&self) -> &'static str {
        if self.energy > 60 {
            "fast-paced"
        } else if self.energy < 40 {
            "slow"
        } else {
            "moderate"
        }
    }
}

/// Visual style for generated footage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AdStyle {
    #[default]
    Cinematic,
    Minimalist,
    Energetic,
    Warm,
    Professional,
    Playful,
}

impl AdStyle {
    pub const ALL: &'static [AdStyle] = &[
        AdStyle::Cinematic,
        AdStyle::Minimalist,
        AdStyle::Energetic,
        AdStyle::Warm,
        AdStyle::Professional,
        AdStyle::Playful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdStyle::Cinematic => "cinematic",
            AdStyle::Minimalist => "minimalist",
            AdStyle::Energetic => "energetic",
            AdStyle::Warm => "warm",
            AdStyle::Professional => "professional",
            AdStyle::Playful => "playful",
        }
    }

    /// Human-readable name for catalog endpoints.
    pub fn display_name(&self) -> &'static str {
        match self {
            AdStyle::Cinematic => "Cinematic",
            AdStyle::Minimalist => "Minimalist",
            AdStyle::Energetic => "Energetic",
            AdStyle::Warm => "Warm",
            AdStyle::Professional => "Professional",
            AdStyle::Playful => "Playful",
        }
    }

    /// Short description for catalog endpoints.
    pub fn blurb(&self) -> &'static str {
        match self {
            AdStyle::Cinematic => "Epic, movie-like visuals",
            AdStyle::Minimalist => "Clean, simple aesthetics",
            AdStyle::Energetic => "Fast-paced, dynamic",
            AdStyle::Warm => "Cozy, inviting feel",
            AdStyle::Professional => "Corporate, polished",
            AdStyle::Playful => "Fun, whimsical style",
        }
    }
}

impl fmt::Display for AdStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cinematic" => Ok(AdStyle::Cinematic),
            "minimalist" => Ok(AdStyle::Minimalist),
            "energetic" => Ok(AdStyle::Energetic),
            "warm" => Ok(AdStyle::Warm),
            "professional" => Ok(AdStyle::Professional),
            "playful" => Ok(AdStyle::Playful),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown ad style: {0}")]
pub struct StyleParseError(String);

/// Narrative archetype driving the script template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    #[default]
    HeroJourney,
    Testimonial,
    ProblemSolution,
    Tutorial,
    Comedy,
    Lifestyle,
}

impl Archetype {
    pub const ALL: &'static [Archetype] = &[
        Archetype::HeroJourney,
        Archetype::Testimonial,
        Archetype::ProblemSolution,
        Archetype::Tutorial,
        Archetype::Comedy,
        Archetype::Lifestyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::HeroJourney => "hero-journey",
            Archetype::Testimonial => "testimonial",
            Archetype::ProblemSolution => "problem-solution",
            Archetype::Tutorial => "tutorial",
            Archetype::Comedy => "comedy",
            Archetype::Lifestyle => "lifestyle",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::HeroJourney => "Hero's Journey",
            Archetype::Testimonial => "Testimonial",
            Archetype::ProblemSolution => "Problem-Solution",
            Archetype::Tutorial => "Tutorial",
            Archetype::Comedy => "Comedy Skit",
            Archetype::Lifestyle => "Lifestyle",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            Archetype::HeroJourney => "Overcome challenges, achieve greatness",
            Archetype::Testimonial => "Real stories, authentic voices",
            Archetype::ProblemSolution => "Show the pain, reveal the cure",
            Archetype::Tutorial => "Step-by-step demonstration",
            Archetype::Comedy => "Humor that sticks",
            Archetype::Lifestyle => "Aspirational, emotional connection",
        }
    }

    /// Opening line template. `{product}` is substituted at synthesis time.
    pub fn intro_template(&self) -> &'static str {
        match self {
            Archetype::HeroJourney => "A hero emerges, faces challenges, and triumphs with {product}.",
            Archetype::Testimonial => "Real people share their transformative experience with {product}.",
            Archetype::ProblemSolution => "The struggle is real... until {product} changes everything.",
            Archetype::Tutorial => "Discover how easy it is to use {product} in just 3 simple steps.",
            Archetype::Comedy => "Life's better with a laugh... and {product}.",
            Archetype::Lifestyle => "Imagine your best life. Now imagine it with {product}.",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = ArchetypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hero-journey" => Ok(Archetype::HeroJourney),
            "testimonial" => Ok(Archetype::Testimonial),
            "problem-solution" => Ok(Archetype::ProblemSolution),
            "tutorial" => Ok(Archetype::Tutorial),
            "comedy" => Ok(Archetype::Comedy),
            "lifestyle" => Ok(Archetype::Lifestyle),
            _ => Err(ArchetypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown archetype: {0}")]
pub struct ArchetypeParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_brief() -> AdBrief {
        AdBrief {
            product_name: "TestProduct".to_string(),
            description: "A test product".to_string(),
            mood: 50,
            energy: 50,
            style: AdStyle::Cinematic,
            archetype: Archetype::HeroJourney,
            target_audience: None,
            call_to_action: None,
        }
    }

    #[test]
    fn test_valid_brief_passes_validation() {
        assert!(valid_brief().validate().is_ok());
    }

    #[test]
    fn test_empty_product_name_rejected() {
        let mut brief = valid_brief();
        brief.product_name = String::new();
        assert!(brief.validate().is_err());
    }

    #[test]
    fn test_oversized_description_rejected() {
        let mut brief = valid_brief();
        brief.description = "x".repeat(5001);
        assert!(brief.validate().is_err());
    }

    #[test]
    fn test_brief_defaults_from_minimal_json() {
        let brief: AdBrief = serde_json::from_str(
            r#"{"productName": "TestProduct", "description": "A test product"}"#,
        )
        .unwrap();
        assert_eq!(brief.mood, 50);
        assert_eq!(brief.energy, 50);
        assert_eq!(brief.style, AdStyle::Cinematic);
        assert_eq!(brief.archetype, Archetype::HeroJourney);
    }

    #[test]
    fn test_tone_and_pace_words() {
        let mut brief = valid_brief();
        assert_eq!(brief.tone_word(), "balanced");
        assert_eq!(brief.pace_word(), "moderate");
        brief.mood = 80;
        brief.energy = 20;
        assert_eq!(brief.tone_word(), "exciting");
        assert_eq!(brief.pace_word(), "slow");
    }

    #[test]
    fn test_archetype_serde_kebab_case() {
        let json = serde_json::to_string(&Archetype::ProblemSolution).unwrap();
        assert_eq!(json, r#""problem-solution""#);
        let back: Archetype = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Archetype::ProblemSolution);
    }

    #[test]
    fn test_style_parse_roundtrip() {
        for style in AdStyle::ALL {
            assert_eq!(style.as_str().parse::<AdStyle>().unwrap(), *style);
        }
    }
}
