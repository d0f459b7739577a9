//! One-shot artifact download
//!
//! The artifact is small enough to buffer fully in memory, so this is a
//! plain GET with no streaming, no auth, and no retry. The body is staged
//! at a `.part` sibling and renamed into place so a failed download never
//! leaves a partial file at the cache path.

use spamsift_core::{Error, Result};
use tracing::info;

use crate::artifact::ArtifactLocation;

/// Fetch the artifact from its remote URL into the local cache path.
pub async fn download_artifact(
    client: &reqwest::Client,
    location: &ArtifactLocation,
) -> Result<()> {
    info!(url = %location.url, path = %location.cache_path.display(), "downloading classifier artifact");

    let response = client.get(&location.url).send().await.map_err(|e| {
        Error::download(format!("request to {} failed: {e}", location.url))
    })?;

    if !response.status().is_success() {
        return Err(Error::download(format!(
            "artifact fetch returned HTTP {}",
            response.status()
        )));
    }

    let body = response.bytes().await.map_err(|e| {
        Error::download(format!("failed to read artifact response body: {e}"))
    })?;

    if let Some(parent) = location.cache_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let staging = location.staging_path();
    if let Err(e) = std::fs::write(&staging, &body) {
        let _ = std::fs::remove_file(&staging);
        return Err(Error::download(format!(
            "failed to write staged artifact {}: {e}",
            staging.display()
        )));
    }
    if let Err(e) = std::fs::rename(&staging, &location.cache_path) {
        let _ = std::fs::remove_file(&staging);
        return Err(Error::download(format!(
            "failed to move artifact into place at {}: {e}",
            location.cache_path.display()
        )));
    }

    info!(
        bytes = body.len(),
        path = %location.cache_path.display(),
        "classifier artifact cached"
    );

    Ok(())
}
