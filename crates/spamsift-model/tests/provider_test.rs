//! Integration tests for the artifact provider
//!
//! Exercises the fetch/cache/memoize contract against a mock HTTP server,
//! with a counting stub standing in for the ONNX deserializer.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use spamsift_core::{Error, Result};
use spamsift_model::{
    ArtifactLoader, ArtifactLocation, ArtifactProvider, LoadedArtifact, SpamModel,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTIFACT_BYTES: &[u8] = b"serialized classifier pipeline";

struct FixedModel;

impl SpamModel for FixedModel {
    fn predict(&self, _text: &str) -> Result<u32> {
        Ok(0)
    }

    fn predict_proba(&self, _text: &str) -> Result<[f64; 2]> {
        Ok([0.9, 0.1])
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Loader stub that counts invocations instead of parsing ONNX
struct CountingLoader {
    loads: AtomicUsize,
    fail: bool,
}

impl CountingLoader {
    fn new() -> Self {
        Self {
            loads: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            loads: AtomicUsize::new(0),
            fail: true,
        }
    }

    fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ArtifactLoader for CountingLoader {
    fn load(&self, path: &Path) -> Result<LoadedArtifact> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(Error::load("stub refuses to deserialize"));
        }

        assert_eq!(std::fs::read(path).unwrap(), ARTIFACT_BYTES);

        Ok(LoadedArtifact {
            model: Arc::new(FixedModel),
            vocabulary: vec!["free".to_string(), "winner".to_string()],
        })
    }
}

async fn mock_artifact_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/naivebayes.onnx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(ARTIFACT_BYTES))
        .mount(&server)
        .await;

    server
}

fn location_for(server: &MockServer, dir: &tempfile::TempDir) -> ArtifactLocation {
    ArtifactLocation::new(
        format!("{}/naivebayes.onnx", server.uri()),
        dir.path().join("naivebayes.onnx"),
    )
}

#[tokio::test]
async fn repeated_gets_fetch_and_load_once() {
    let server = mock_artifact_server().await;
    let dir = tempfile::tempdir().unwrap();
    let loader = Arc::new(CountingLoader::new());

    let provider = ArtifactProvider::new(location_for(&server, &dir), loader.clone());

    let first = provider.get().await.expect("first get should succeed");
    for _ in 0..4 {
        let again = provider.get().await.expect("memoized get should succeed");
        assert!(Arc::ptr_eq(&first, &again));
    }

    assert_eq!(loader.load_count(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(first.vocabulary.len(), 2);
}

#[tokio::test]
async fn pre_existing_cache_file_skips_the_network() {
    let server = mock_artifact_server().await;
    let dir = tempfile::tempdir().unwrap();
    let location = location_for(&server, &dir);

    std::fs::write(&location.cache_path, ARTIFACT_BYTES).unwrap();

    let loader = Arc::new(CountingLoader::new());
    let provider = ArtifactProvider::new(location, loader.clone());

    provider.get().await.expect("cached get should succeed");

    assert_eq!(loader.load_count(), 1);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn http_error_fails_with_download_error_and_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/naivebayes.onnx"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let location = location_for(&server, &dir);
    let loader = Arc::new(CountingLoader::new());
    let provider = ArtifactProvider::new(location.clone(), loader.clone());

    let err = provider.get().await.unwrap_err();
    assert!(matches!(err, Error::Download(_)));

    // Nothing written to the cache path, partial or otherwise.
    assert!(!location.cache_path.exists());
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    assert_eq!(loader.load_count(), 0);
    assert!(!provider.is_loaded());
}

#[tokio::test]
async fn unreachable_host_fails_with_download_error() {
    // Bind-then-drop gives a port nothing is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let location = ArtifactLocation::new(
        format!("http://{addr}/naivebayes.onnx"),
        dir.path().join("naivebayes.onnx"),
    );
    let provider = ArtifactProvider::new(location, Arc::new(CountingLoader::new()));

    let err = provider.get().await.unwrap_err();
    assert!(matches!(err, Error::Download(_)));
}

#[tokio::test]
async fn loader_failure_surfaces_as_load_error() {
    let server = mock_artifact_server().await;
    let dir = tempfile::tempdir().unwrap();
    let location = location_for(&server, &dir);

    let provider = ArtifactProvider::new(location.clone(), Arc::new(CountingLoader::failing()));

    let err = provider.get().await.unwrap_err();
    assert!(matches!(err, Error::Load(_)));

    // The download itself succeeded, so the cache file stays in place.
    assert!(location.cache_path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_loads_share_one_download() {
    let server = mock_artifact_server().await;
    let dir = tempfile::tempdir().unwrap();
    let loader = Arc::new(CountingLoader::new());

    let provider = Arc::new(ArtifactProvider::new(
        location_for(&server, &dir),
        loader.clone(),
    ));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.get().await })
        })
        .collect();

    let artifacts: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().expect("every caller should get a handle"))
        .collect();

    // Exactly one fetch and one deserialization, one shared handle.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(loader.load_count(), 1);
    for artifact in &artifacts[1..] {
        assert!(Arc::ptr_eq(&artifacts[0], artifact));
    }
}
