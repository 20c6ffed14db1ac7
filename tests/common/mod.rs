#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use moodtrack_api::db::MemoryStore;
use moodtrack_api::{router, AppState, Config};

pub fn test_config() -> Config {
    Config {
        database_url: None,
        database_max_connections: 1,
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        cors_extra_origins: Vec::new(),
        jwt_secret: "integration-test-secret".into(),
        jwt_ttl_secs: 3600,
    }
}

pub fn test_app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::new()), test_config()))
}

/// Serves a fresh app on an ephemeral port and returns its base URL.
pub async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = test_app();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    format!("http://{}", addr)
}
