//! # Common Test Utilities
//!
//! Centralizes the `TestApp` harness used across the `seoforge-server`
//! integration tests. The harness spawns a real server on a random port,
//! with every external surface (Gemini, the marketplaces, the WhatsApp
//! Graph API) pointed at a single `httpmock::MockServer`.

// Allow unused code because not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use reqwest::Client;
use seoforge_server::{
    config,
    router::create_router,
    state::{build_app_state, AppState},
};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};

/// The verify token written into every test configuration.
pub const VERIFY_TOKEN: &str = "test-verify-token";

/// The WhatsApp phone number id written into every test configuration.
pub const PHONE_NUMBER_ID: &str = "1234567890";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server in template mode: no Gemini key, no WhatsApp
    /// credentials, marketplaces pointed at the mock server.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_inner(false, false).await
    }

    /// Spawns the server with the Gemini endpoint pointed at the mock
    /// server and a non-placeholder key.
    pub async fn spawn_with_gemini() -> Result<Self> {
        Self::spawn_inner(true, false).await
    }

    /// Spawns the server with WhatsApp credentials so the reply worker
    /// runs and outbound sends hit the mock server.
    pub async fn spawn_with_whatsapp() -> Result<Self> {
        Self::spawn_inner(false, true).await
    }

    async fn spawn_inner(with_gemini: bool, with_whatsapp: bool) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let base = mock_server.base_url();

        let gemini_section = if with_gemini {
            format!(
                r#"
gemini:
  api_key: "test-api-key"
  api_url: "{base}/v1beta/models/gemini-pro:generateContent"
"#
            )
        } else {
            String::new()
        };
        let whatsapp_section = if with_whatsapp {
            format!(
                r#"
whatsapp:
  verify_token: "{VERIFY_TOKEN}"
  access_token: "test-access-token"
  phone_number_id: "{PHONE_NUMBER_ID}"
  api_url: "{base}/whatsapp"
"#
            )
        } else {
            format!(
                r#"
whatsapp:
  verify_token: "{VERIFY_TOKEN}"
"#
            )
        };
        // Upstream spacing is dropped to keep tests fast; the marketplaces
        // get a short timeout so a missing mock cannot stall a test.
        let config_content = format!(
            r#"
port: 0
throttle:
  min_request_interval_secs: 0
scrape:
  timeout_ms: 2000
  amazon_url: "{base}"
  flipkart_url: "{base}"
  myntra_url: "{base}"
  meesho_url: "{base}"
{gemini_section}{whatsapp_section}"#
        );

        let config_dir = TempDir::new()?;
        let config_path = config_dir.path().join("config.yml");
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A minimal Gemini generateContent response wrapping `text`.
pub fn gemini_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    })
}
