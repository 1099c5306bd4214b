// HTTP routes

mod http;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::series::Series;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) series: Arc<RwLock<Option<Series>>>,
    pub(crate) config: AppConfig,
}

pub fn app(config: AppConfig) -> Router {
    let max_upload_bytes = config.ingest.max_upload_bytes;
    let state = AppState {
        series: Arc::new(RwLock::new(None)),
        config,
    };
    Router::new()
        .route("/", get(|| async { "perfchart: POST a CSV to /api/upload" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/upload", post(http::upload_handler)) // POST /api/upload
        .route("/api/series", get(http::series_handler)) // GET /api/series
        .route("/api/aggregate", get(http::aggregate_handler)) // GET /api/aggregate
        .route("/api/intervals", get(http::intervals_handler)) // GET /api/intervals
        .route("/api/ticks", get(http::ticks_handler)) // GET /api/ticks
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
