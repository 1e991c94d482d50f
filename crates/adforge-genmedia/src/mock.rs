//! Deterministic placeholder assets.
//!
//! The mock URL is a pure function of the product name and scene
//! description: same inputs always give the same URL, and producing it
//! can never fail. This is the safe harbor every vendor failure lands in.

/// Length of the scene-description fragment used in mock filenames.
const DESCRIPTION_SLUG_LEN: usize = 20;

/// Placeholder URL for a scene. Never touches the network.
pub fn mock_video_url(product_name: &str, scene_description: &str) -> String {
    format!(
        "/videos/{}-scene-{}.mp4",
        product_slug(product_name),
        description_slug(scene_description)
    )
}

/// Lowercased, dash-separated product name for filenames.
pub fn product_slug(product_name: &str) -> String {
    let base = if product_name.is_empty() {
        "product"
    } else {
        product_name
    };
    base.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// First characters of the scene description, dash-separated.
pub fn description_slug(description: &str) -> String {
    let base = if description.is_empty() {
        "scene"
    } else {
        description
    };
    base.chars()
        .take(DESCRIPTION_SLUG_LEN)
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}
