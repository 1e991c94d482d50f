//! Output-directory helpers.
//!
//! The output directory is the only shared resource between concurrent
//! generation calls; it is treated as append-only with unique filenames
//! derived from the product slug and a timestamp.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::GenMediaError;
use crate::mock::{description_slug, product_slug};

/// Unique filename for a generated video asset.
pub fn unique_video_filename(product_name: &str) -> String {
    format!(
        "{}-scene-{}.mp4",
        product_slug(product_name),
        chrono::Utc::now().timestamp()
    )
}

/// Filename for a scene's narration audio.
pub fn audio_filename(scene_description: &str) -> String {
    format!("audio-{}.mp3", description_slug(scene_description))
}

/// Write media bytes into the output directory, creating it if needed.
pub async fn write_media_file(
    output_dir: &Path,
    filename: &str,
    bytes: &[u8],
) -> Result<PathBuf, GenMediaError> {
    tokio::fs::create_dir_all(output_dir).await?;
    let dest = output_dir.join(filename);
    let mut file = tokio::fs::File::create(&dest).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(dest)
}

/// Stream a vendor asset URL to disk without buffering it in memory.
pub async fn download_to_file(
    http: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<PathBuf, GenMediaError> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let response = http.get(url).send().await?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(GenMediaError::Provider { status, body });
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(GenMediaError::from)?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(dest.to_path_buf())
}
