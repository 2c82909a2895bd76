//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api;
use crate::models::AppConfig;
use crate::services::{EnhancementPipeline, InferenceCache};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "fuzzy-enhance API",
        description = "Fuzzy-logic image enhancement: analyze a picture, infer corrections, apply them",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_health,
        api::handle_knowledge_base,
        api::handle_infer,
        api::handle_analyze,
        api::handle_enhance,
    ),
    components(schemas(
        api::MetricsBody,
        api::InferResponse,
        api::AnalyzeResponse,
    )),
    tags(
        (name = "Service", description = "Service health"),
        (name = "Inference", description = "Fuzzy inference on image metrics"),
        (name = "Imaging", description = "PNG analysis and enhancement")
    )
)]
pub struct ApiDoc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<EnhancementPipeline>,
}

/// Create application state from a loaded configuration.
///
/// Fails if the configured knowledge base cannot be loaded.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let knowledge_base = config
        .load_knowledge_base()
        .map_err(|e| anyhow::anyhow!("Failed to load knowledge base: {e}"))?;

    let cache = config
        .cache
        .enabled
        .then(|| Arc::new(InferenceCache::new(config.cache.capacity)));

    tracing::info!(
        rules = knowledge_base.rules().len(),
        cache = ?cache.as_ref().map(|c| c.capacity()),
        "Enhancement pipeline ready"
    );

    let pipeline = Arc::new(EnhancementPipeline::new(Arc::new(knowledge_base), cache));

    Ok(AppState {
        config: Arc::new(config),
        pipeline,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.limits.max_image_bytes;

    Router::new()
        .route("/api/knowledge-base", get(api::handle_knowledge_base))
        .route("/api/infer", post(api::handle_infer))
        .route("/api/analyze", post(api::handle_analyze))
        .route("/api/enhance", post(api::handle_enhance))
        // OpenAPI document
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Health check
        .route("/health", get(api::handle_health))
        // Add state, upload limit and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
