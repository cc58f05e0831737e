//! REST API test harness.
//!
//! Wraps an [`axum_test::TestServer`] around the todo manager routes while
//! keeping a handle on the backend, so tests can inspect the store directly.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Method;
use axum_test::{TestResponse, TestServer};
use serde_json::Value;
use todo_persistence::backends::memory::InMemoryBackend;
use todo_rest::{AppState, ServerConfig, ShutdownHandle, routing};

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// let harness = TodoTestHarness::seeded();
/// let response = harness.get("/todos/1").await;
/// assert_status(&response, 200);
/// ```
pub struct TodoTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend shared with the server.
    pub backend: Arc<InMemoryBackend>,

    /// Handle triggered by `GET /shutdown`.
    pub shutdown: ShutdownHandle,
}

impl TodoTestHarness {
    /// Harness over the startup sample data.
    pub fn seeded() -> Self {
        Self::with_backend(InMemoryBackend::with_sample_data())
    }

    /// Harness over an empty store.
    pub fn empty() -> Self {
        Self::with_backend(InMemoryBackend::new())
    }

    /// Creates a harness around the given backend.
    pub fn with_backend(backend: InMemoryBackend) -> Self {
        let backend = Arc::new(backend);
        let shutdown = ShutdownHandle::new();
        let state = AppState::with_shutdown(
            Arc::clone(&backend),
            ServerConfig::for_testing(),
            shutdown.clone(),
        );
        let server =
            TestServer::new(routing::create_routes(state)).expect("Failed to create test server");

        Self {
            server,
            backend,
            shutdown,
        }
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.server.get(path).await
    }

    /// Makes a HEAD request.
    pub async fn head(&self, path: &str) -> TestResponse {
        self.server.method(Method::HEAD, path).await
    }

    /// Makes a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.server.post(path).json(&body).await
    }

    /// Makes a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.server.put(path).json(&body).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.server.delete(path).await
    }

    /// Sends raw bytes with an optional content type.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> TestResponse {
        let request = self
            .server
            .method(method, path)
            .bytes(Bytes::from_static(body.as_bytes()));
        match content_type {
            Some(content_type) => request.content_type(content_type).await,
            None => request.await,
        }
    }

    /// Creates a record and returns its id.
    pub async fn create(&self, plural: &str, body: Value) -> String {
        let response = self.post(&format!("/{}", plural), body).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"]
            .as_str()
            .expect("created record has an id")
            .to_string()
    }

    /// Returns the ids listed at a collection or sub-collection path.
    pub async fn ids_at(&self, path: &str, plural: &str) -> Vec<String> {
        let response = self.get(path).await;
        response.assert_status_ok();
        response.json::<Value>()[plural]
            .as_array()
            .expect("listing is an array")
            .iter()
            .filter_map(|record| record["id"].as_str().map(str::to_string))
            .collect()
    }
}
