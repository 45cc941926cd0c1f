//! Download reward photos to disk.

use reqwest::Client;
use std::path::{Path, PathBuf};

use super::package::{media_path, Photo};
use crate::error::{CoreError, Result};

/// Fetch `photo.url` and write it to `<dir>/<photo.filename>`.
///
/// # Errors
/// Fails on transport errors, a non-success status, or a write failure.
pub async fn save_photo_locally(client: &Client, photo: &Photo, dir: &Path) -> Result<PathBuf> {
    let path = media_path(dir, &photo.filename)?;
    let resp = client.get(&photo.url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(CoreError::DownloadFailed {
            url: photo.url.clone(),
            status: status.as_u16(),
        });
    }
    let bytes = resp.bytes().await?;

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, &bytes).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "photo saved");
    Ok(path)
}
