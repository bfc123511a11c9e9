//! Shared test harness for integration tests.
//!
//! [`TestHarness`] builds an [`AppContext`] over a temporary upload
//! directory. [`TestHarness::with_server`] serves it on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use sb_core::config::Config;
use sb_server::context::AppContext;
use sb_server::router::build_router;
use sb_store::ImageStore;

pub const UPLOAD_URL: &str = "http://192.168.1.20:5000/upload-page";

/// Test harness wrapping an [`AppContext`] backed by a temp directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration. The upload
    /// directory is always redirected into a fresh temp dir.
    pub fn with_config(mut config: Config) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        config.storage.upload_dir = dir.path().join("uploads");

        let store = ImageStore::new(&config.storage.upload_dir);
        store.init().expect("failed to create upload dir");

        let ctx = AppContext::new(config, store, UPLOAD_URL.to_string())
            .expect("failed to build context");
        Self { ctx, dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn upload_dir(&self) -> &Path {
        self.ctx.store.root()
    }

    /// Drop a file straight into the upload directory.
    pub fn seed(&self, key: &str, data: &[u8]) {
        std::fs::write(self.upload_dir().join(key), data).expect("failed to seed file");
    }

    /// Number of entries currently in the upload directory.
    pub fn file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir())
            .expect("failed to read upload dir")
            .count()
    }
}

/// POST `data` as the `image` field with the given filename.
pub async fn upload(addr: SocketAddr, filename: &str, data: &[u8]) -> serde_json::Value {
    let part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(filename.to_string());
    let form = reqwest::multipart::Form::new().part("image", part);
    post_form(addr, form).await
}

/// POST an arbitrary multipart form to `/upload` and decode the JSON reply.
pub async fn post_form(addr: SocketAddr, form: reqwest::multipart::Form) -> serde_json::Value {
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .multipart(form)
        .send()
        .await
        .expect("upload request failed");
    assert_eq!(resp.status(), 200);
    resp.json().await.expect("upload response was not JSON")
}

/// GET `/images` as a list of keys.
pub async fn listing(addr: SocketAddr) -> Vec<String> {
    let resp = reqwest::get(format!("http://{addr}/images"))
        .await
        .expect("listing request failed");
    assert_eq!(resp.status(), 200);
    resp.json().await.expect("listing was not a JSON array")
}
