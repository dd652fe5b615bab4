use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use pokedex_api::auth::JwtAuthenticator;
use pokedex_api::database::MemoryPokedexStore;
use pokedex_api::{app, AppState};
use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

const TEST_SECRET: &str = "integration-test-secret";

/// In-process server on a free port, backed by a fresh in-memory store
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    issuer: JwtAuthenticator,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(
            Arc::new(MemoryPokedexStore::new()),
            Arc::new(JwtAuthenticator::new(TEST_SECRET, 1)),
        );
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            base_url,
            client: reqwest::Client::new(),
            issuer: JwtAuthenticator::new(TEST_SECRET, 1),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A new actor with a valid token
    pub fn user(&self) -> Result<TestUser> {
        let id = Uuid::new_v4();
        let token = self.issuer.issue(id)?;
        Ok(TestUser { id, token })
    }

    /// POST /pokedex and return the created record
    pub async fn create(&self, user: &TestUser, pokedex: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/pokedex"))
            .bearer_auth(&user.token)
            .json(&serde_json::json!({ "pokedex": pokedex }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        let body = res.json::<Value>().await?;
        Ok(body["pokedex"].clone())
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}
