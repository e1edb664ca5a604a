#![allow(dead_code)]

use std::{fmt, fs::File, net::SocketAddr};

use anyhow::Context;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use trips::{
    config::AppConfig,
    db::{init_pool, run_migrations},
    routes::create_router,
    state::AppState,
};

/// A router over a fresh, migrated SQLite file that lives as long as this value.
pub struct TestApp {
    pub state: AppState,
    router: Router,
    _root: TempDir,
}

impl fmt::Debug for TestApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestApp").finish()
    }
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for test app")?;
        let db_path = root.path().join("trips.sqlite");
        File::create(&db_path)?;

        let config = AppConfig {
            database_url: format!("sqlite://{}", db_path.to_string_lossy()),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            max_connections: 4,
        };

        let db = init_pool(&config.database_url, config.max_connections).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db);
        let router = create_router(state.clone());
        Ok(Self {
            state,
            router,
            _root: root,
        })
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        TestResponse {
            status,
            headers,
            bytes: bytes.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a trip over HTTP and returns its id.
    pub async fn create_trip(&self, title: &str, start: &str, end: &str) -> i64 {
        let response = self
            .post(
                "/v1/trips",
                serde_json::json!({
                    "title": title,
                    "description": format!("{title} description"),
                    "startTrip": start,
                    "endTrip": end,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()["id"].as_i64().expect("numeric trip id")
    }

    /// Creates a meeting attached to `trip_id` and returns its id.
    pub async fn create_meeting(&self, title: &str, trip_id: i64) -> i64 {
        let response = self
            .post(
                "/v1/meetings",
                serde_json::json!({ "title": title, "businessTrip": { "id": trip_id } }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()["id"].as_i64().expect("numeric meeting id")
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response body is json")
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Titles of a list response, in response order. A 204 yields no titles.
    pub fn titles(&self) -> Vec<String> {
        if self.status == StatusCode::NO_CONTENT {
            return Vec::new();
        }
        self.json()
            .as_array()
            .expect("list body is an array")
            .iter()
            .map(|item| item["title"].as_str().expect("title").to_string())
            .collect()
    }
}
