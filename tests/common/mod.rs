#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use roster_api::config::AppConfig;
use roster_api::database::models::{NewUser, User};
use roster_api::database::{MemoryStore, TeacherStore};
use roster_api::{app, AppState};

/// Router served in-process on a free port, backed by a memory store the test can poke at
pub struct TestServer {
    pub base_url: String,
    pub mount_path: String,
    pub store: Arc<MemoryStore>,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn teachers_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.mount_path, path)
    }

    pub async fn seed_user(&self, name: &str) -> Result<User> {
        let user = self
            .store
            .insert_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
            })
            .await?;
        Ok(user)
    }

    pub async fn user(&self, user: &User) -> Result<User> {
        self.store
            .find_user(user.id)
            .await?
            .context("seeded user disappeared")
    }

    /// POST a valid teacher for `creator` and return the created teacher JSON
    pub async fn create_teacher(&self, client: &reqwest::Client, creator: &User, name: &str) -> Result<Value> {
        let res = client
            .post(self.teachers_url(""))
            .json(&json!({
                "name": name,
                "phone": "5551234567",
                "email": format!("{}@school.test", name.to_lowercase().replace(' ', ".")),
                "creator": creator.id.to_string(),
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == reqwest::StatusCode::CREATED, "create failed: {}", res.status());

        let body = res.json::<Value>().await?;
        Ok(body["teacher"].clone())
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let mut config = AppConfig::development();
    config.server.enable_request_logging = false;
    spawn_server_with(config).await
}

pub async fn spawn_server_with(config: AppConfig) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn TeacherStore> = store.clone();
    let router = app(AppState::new(dyn_store, &config), &config);

    // Bound before spawning, so requests queue until the server task picks them up
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(TestServer {
        base_url,
        mount_path: config.server.mount_path.clone(),
        store,
        handle,
    })
}
