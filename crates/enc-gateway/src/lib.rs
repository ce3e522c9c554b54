//! Read-only HTTP query service over the analysis source tree.
//!
//! Lists models and images, streams single images, and returns the latest
//! resolved result document for a (model, image) pair. Every request reads the
//! source tree directly; nothing is cached.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Path as RoutePath, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use enc_catalog::{image_content_type, CatalogError, CatalogLayout, CatalogQuery};
use enc_core::{CatalogFs, LocalFs};
use serde_json::{json, Value};
use tokio::net::TcpListener;

mod query_api_error;
mod viewer_page;

use query_api_error::QueryApiError;
use viewer_page::render_viewer_page;

pub const DEFAULT_QUERY_SERVER_BIND: &str = "127.0.0.1:5000";

const VIEWER_ENDPOINT: &str = "/";
const HEALTH_ENDPOINT: &str = "/healthz";
const MODELS_ENDPOINT: &str = "/api/models";
const FILES_ENDPOINT: &str = "/api/files";
const IMAGE_ENDPOINT: &str = "/api/image/{filename}";
const JSON_ENDPOINT: &str = "/api/json/{model}/{filename}";
const IMAGE_ENDPOINT_PREFIX: &str = "/api/image";
const JSON_ENDPOINT_PREFIX: &str = "/api/json";

#[derive(Debug, Clone)]
/// Bind address and source layout for the query server.
pub struct QueryServerConfig {
    pub bind: String,
    pub layout: CatalogLayout,
}

impl QueryServerConfig {
    pub fn new(layout: CatalogLayout) -> Self {
        Self {
            bind: DEFAULT_QUERY_SERVER_BIND.to_string(),
            layout,
        }
    }
}

#[derive(Clone)]
struct QueryServerState {
    query: CatalogQuery,
}

impl QueryServerState {
    fn new(fs: Arc<dyn CatalogFs>, layout: CatalogLayout) -> Self {
        Self {
            query: CatalogQuery::new(fs, layout),
        }
    }
}

/// Run the query server until Ctrl-C.
pub async fn run_query_server(config: QueryServerConfig) -> Result<()> {
    config
        .layout
        .validate()
        .context("invalid query server layout")?;
    let bind_addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid --bind '{}': expected host:port", config.bind))?;

    for dir in [config.layout.images_root(), config.layout.results_root()] {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "source directory missing; related routes will fail");
        }
    }

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind query server on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve query server listen address")?;
    tracing::info!(
        addr = %local_addr,
        source_root = %config.layout.source_root.display(),
        "query server listening"
    );

    let state = Arc::new(QueryServerState::new(Arc::new(LocalFs), config.layout));
    let app = build_query_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("query server exited unexpectedly")?;
    tracing::info!("query server stopped");
    Ok(())
}

fn build_query_router(state: Arc<QueryServerState>) -> Router {
    Router::new()
        .route(VIEWER_ENDPOINT, get(handle_viewer_page))
        .route(HEALTH_ENDPOINT, get(handle_health))
        .route(MODELS_ENDPOINT, get(handle_models))
        .route(FILES_ENDPOINT, get(handle_files))
        .route(IMAGE_ENDPOINT, get(handle_image))
        .route(JSON_ENDPOINT, get(handle_json))
        .with_state(state)
}

async fn handle_viewer_page() -> Html<String> {
    Html(render_viewer_page())
}

async fn handle_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

/// Runs a filesystem-backed catalog query on the blocking pool.
async fn run_catalog_query<T, F>(
    state: &QueryServerState,
    operation: F,
) -> Result<T, QueryApiError>
where
    T: Send + 'static,
    F: FnOnce(&CatalogQuery) -> T + Send + 'static,
{
    let query = state.query.clone();
    tokio::task::spawn_blocking(move || operation(&query))
        .await
        .map_err(|error| QueryApiError::internal(format!("catalog query task failed: {error}")))
}

async fn handle_models(State(state): State<Arc<QueryServerState>>) -> Response {
    match run_catalog_query(&state, |query| query.list_models()).await {
        Ok(Ok(models)) => Json(models).into_response(),
        Ok(Err(error)) => QueryApiError::internal(error.to_string()).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn handle_files(State(state): State<Arc<QueryServerState>>) -> Response {
    match run_catalog_query(&state, |query| query.list_images()).await {
        Ok(Ok(images)) => Json(images).into_response(),
        Ok(Err(error)) => QueryApiError::internal(error.to_string()).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn handle_image(
    State(state): State<Arc<QueryServerState>>,
    RoutePath(filename): RoutePath<String>,
) -> Response {
    let lookup = filename.clone();
    match run_catalog_query(&state, move |query| query.read_image(&lookup)).await {
        Ok(Ok(Some(bytes))) => (
            [(CONTENT_TYPE, image_content_type(&filename))],
            Bytes::from(bytes),
        )
            .into_response(),
        Ok(Ok(None)) => QueryApiError::file_not_found().into_response(),
        Ok(Err(error)) => QueryApiError::internal(error.to_string()).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn handle_json(
    State(state): State<Arc<QueryServerState>>,
    RoutePath((model, filename)): RoutePath<(String, String)>,
) -> Response {
    let resolved =
        run_catalog_query(&state, move |query| query.resolve_document(&model, &filename)).await;
    match resolved {
        Ok(Ok(Some(document))) => Json(Value::Object(document)).into_response(),
        Ok(Ok(None)) => QueryApiError::json_not_found().into_response(),
        Ok(Err(CatalogError::UnknownModel(_))) => QueryApiError::invalid_model().into_response(),
        Ok(Err(error)) => QueryApiError::internal(error.to_string()).into_response(),
        Err(error) => error.into_response(),
    }
}
