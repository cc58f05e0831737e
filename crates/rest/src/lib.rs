//! # todo-rest - Todo Manager RESTful API
//!
//! This crate exposes the todo manager store over HTTP: collections of todos,
//! projects and categories, the relationships between them, and the
//! method-by-method dispatch that decides between 200, 201, 400, 404 and 405.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use todo_persistence::backends::memory::InMemoryBackend;
//! use todo_rest::{ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(InMemoryBackend::with_sample_data(), config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Route | GET / HEAD | POST | PUT | DELETE |
//! |-------|------------|------|-----|--------|
//! | `/{entity}` | list | create | 405 | 405 |
//! | `/{entity}/{id}` | read | amend | replace | delete |
//! | `/{entity}/{id}/{relation}` | list related | link | 405 | 405 |
//! | `/{entity}/{id}/{relation}/{id}` | 404 | 404 | 405 | unlink |
//!
//! Entities are `todos`, `projects` and `categories`. Relations are
//! `todos/{id}/categories`, `todos/{id}/tasksof`, `projects/{id}/tasks`,
//! `projects/{id}/categories`, `categories/{id}/todos` and
//! `categories/{id}/projects`.
//!
//! `GET /` returns a service index, `GET /health` a health report and
//! `GET /shutdown` stops the server.
//!
//! ## Error Handling
//!
//! All errors are returned as `{"errorMessages": ["..."]}` with the status
//! code of the failure:
//!
//! | HTTP Status | Description |
//! |-------------|-------------|
//! | 400 | Malformed body, unknown field, wrong field type, forbidden id |
//! | 404 | No such record, edge, entity or relation |
//! | 405 | Method not supported on this route shape |
//! | 413 | Body larger than the configured limit |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and `errorMessages` generation
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration, shutdown)
//! - [`handlers`] - HTTP request handlers for each interaction
//! - [`extractors`] - Axum extractors
//! - [`responses`] - Response bodies
//! - [`routing`] - Route shapes and route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::{AppState, ShutdownHandle};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request, State},
    http::{Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
};
use todo_persistence::core::RelationshipStorage;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: RelationshipStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// `GET /shutdown` triggers a handle nobody waits on; use
/// [`create_app_with_shutdown`] to serve with graceful shutdown.
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: RelationshipStorage + Send + Sync + 'static,
{
    create_app_with_shutdown(storage, config, ShutdownHandle::new())
}

/// Creates the Axum application, wiring `GET /shutdown` to `shutdown`.
///
/// # Example
///
/// ```rust,no_run
/// use todo_persistence::backends::memory::InMemoryBackend;
/// use todo_rest::{ServerConfig, ShutdownHandle, create_app_with_shutdown};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let shutdown = ShutdownHandle::new();
/// let app = create_app_with_shutdown(
///     InMemoryBackend::new(),
///     ServerConfig::default(),
///     shutdown.clone(),
/// );
///
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:4567").await?;
/// axum::serve(listener, app)
///     .with_graceful_shutdown(async move { shutdown.wait().await })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn create_app_with_shutdown<S>(
    storage: S,
    config: ServerConfig,
    shutdown: ShutdownHandle,
) -> Router
where
    S: RelationshipStorage + Send + Sync + 'static,
{
    info!(
        "Creating todo manager REST API with backend: {}",
        storage.backend_name()
    );

    // Create application state
    let state = AppState::with_shutdown(Arc::new(storage), config.clone(), shutdown);

    // Build the router with all routes
    let router = routing::create_routes(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_size));

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        with_cors(router, cors)
    } else {
        router
    };

    // Request IDs are set before propagation sees the request
    let router = if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Wraps the router in CORS handling.
///
/// `CorsLayer` answers every `OPTIONS` request itself. Only real preflights
/// are sent through it; any other `OPTIONS` reaches the route-shape handlers
/// and gets their 405 or 404.
fn with_cors(router: Router, cors: CorsLayer) -> Router {
    router
        .clone()
        .layer(cors)
        .layer(middleware::from_fn_with_state(router, bypass_cors_unless_preflight))
}

async fn bypass_cors_unless_preflight(
    State(plain): State<Router>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS && !is_preflight(&req) {
        match plain.oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    } else {
        next.run(req).await
    }
}

/// An `OPTIONS` request carrying both `Origin` and
/// `Access-Control-Request-Method`.
fn is_preflight(req: &Request) -> bool {
    let headers = req.headers();
    headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG`, when set,
/// takes precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "todo_manager={level},todo_rest={level},todo_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
