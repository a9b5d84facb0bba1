#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "test-password";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    public_root: tempfile::TempDir,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Each test process gets its own public root so upload assertions
        // never see files from other runs
        let public_root = tempfile::tempdir().context("failed to create temp public root")?;

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/harborview-admin-api");
        cmd.env("ADMIN_API_PORT", port.to_string())
            .env("UPLOAD_PUBLIC_ROOT", public_root.path())
            .env("ADMIN_USERNAME", TEST_USERNAME)
            .env("ADMIN_PASSWORD", TEST_PASSWORD)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, public_root, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            let url = format!("{}/health", self.base_url);
            match client.get(&url).send().await {
                Ok(resp) => {
                    if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Filesystem directory backing one upload category.
    pub fn upload_dir(&self, category: &str) -> PathBuf {
        self.public_root.path().join("uploads").join(category)
    }

    /// Stored file names currently on disk for one category.
    pub fn stored_files(&self, category: &str) -> Result<Vec<String>> {
        let dir = self.upload_dir(category);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Cookie-holding client that has already logged in as the test admin.
pub async fn logged_in_client(server: &TestServer) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&serde_json::json!({
            "username": TEST_USERNAME,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await?;

    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    Ok(client)
}
