//! Memoized artifact provider
//!
//! Owns the download-then-load lifecycle of the classifier artifact and
//! hands out the shared in-memory handle. The artifact is fetched and
//! deserialized at most once per process; concurrent cold-start callers
//! block on the one in-flight initialization instead of racing the cache
//! file.

use std::sync::Arc;

use spamsift_core::Result;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::artifact::ArtifactLocation;
use crate::classifier::{ArtifactLoader, LoadedArtifact};
use crate::fetch::download_artifact;

/// Once-initialized owner of the classifier artifact.
///
/// Construct one per process, put it behind an `Arc` in your application
/// state, and call [`get`](Self::get) wherever a prediction is needed.
pub struct ArtifactProvider {
    location: ArtifactLocation,
    loader: Arc<dyn ArtifactLoader>,
    client: reqwest::Client,
    cell: OnceCell<Arc<LoadedArtifact>>,
}

impl ArtifactProvider {
    /// Provider for the given location and deserialization backend
    pub fn new(location: ArtifactLocation, loader: Arc<dyn ArtifactLoader>) -> Self {
        Self {
            location,
            loader,
            client: reqwest::Client::new(),
            cell: OnceCell::new(),
        }
    }

    /// Where this provider fetches from and caches to
    pub fn location(&self) -> &ArtifactLocation {
        &self.location
    }

    /// Whether the artifact is already resident in memory
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the loaded classifier, fetching and deserializing it on first
    /// call.
    ///
    /// The `OnceCell` is the single-flight guard: under concurrent first
    /// calls exactly one download and one load run, and every caller gets
    /// the same handle. A failed initialization is not cached, so the next
    /// request starts over; nothing retries automatically within a request.
    pub async fn get(&self) -> Result<Arc<LoadedArtifact>> {
        let artifact = self
            .cell
            .get_or_try_init(|| self.fetch_and_load())
            .await?;
        Ok(Arc::clone(artifact))
    }

    async fn fetch_and_load(&self) -> Result<Arc<LoadedArtifact>> {
        if self.location.is_cached() {
            // Cached file is trusted as-is: no checksum, no freshness check.
            debug!(path = %self.location.cache_path.display(), "artifact cache hit, skipping download");
        } else {
            download_artifact(&self.client, &self.location).await?;
        }

        let loaded = self.loader.load(&self.location.cache_path)?;
        Ok(Arc::new(loaded))
    }
}
