use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// The write secret every test server is started with.
pub const WRITE_TOKEN: &str = "Abracadabra";

pub struct TestServer {
    pub base_url: String,
    _child: Child,
    _store_dir: tempfile::TempDir,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Each test binary gets its own empty JSONL store
        let store_dir = tempfile::tempdir().context("failed to create store dir")?;
        let log_path = store_dir.path().join("hud_log.jsonl");

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/hud-api-rust");
        cmd.env("HUD_API_PORT", port.to_string())
            .env("HUD_LOG_PATH", &log_path)
            .env("HUD_WRITE_TOKEN", WRITE_TOKEN)
            // The inference endpoint points at a closed port so proxy tests
            // exercise the upstream-failure path without leaving the host.
            .env("NEMOTRON_API_URL", "http://127.0.0.1:9/v1/chat/completions")
            .env("NEMOTRON_API_KEY", "test-key")
            .env_remove("DATABASE_URL")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            base_url,
            _child: child,
            _store_dir: store_dir,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
