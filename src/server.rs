use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    blog::write_blog,
    config::AppConfig,
    error::ServiceError,
    model::{BlogBriefRequest, BlogRequest, BlogResponse, ModelMetadata, ModelRegistry},
    prompt::brief_prompt,
    sampling::SamplingParams,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<ModelRegistry>,
}

#[derive(Serialize)]
struct MetadataResponse {
    model: ModelMetadata,
    sampling: SamplingParams,
}

pub fn build_router(config: Arc<AppConfig>, registry: Arc<ModelRegistry>) -> Router {
    let state = AppState { config, registry };

    Router::new()
        .route("/health", get(health))
        .route("/generate-blog", post(generate_blog))
        .route("/generate-blog/brief", post(generate_blog_from_brief))
        .route("/metadata", get(metadata))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> &'static str {
    "ok"
}

async fn generate_blog(
    State(state): State<AppState>,
    Json(request): Json<BlogRequest>,
) -> Result<Json<BlogResponse>, ServiceError> {
    let content = write_blog(&state.registry, &state.config.sampling(), &request.prompt).await?;
    Ok(Json(BlogResponse { content }))
}

async fn generate_blog_from_brief(
    State(state): State<AppState>,
    Json(request): Json<BlogBriefRequest>,
) -> Result<Json<BlogResponse>, ServiceError> {
    if request.topic.is_empty() {
        return Err(ServiceError::BadRequest("topic is required".into()));
    }
    info!(topic = %request.topic, word_count = ?request.word_count, "blog brief received");

    let prompt = brief_prompt(&request.topic, request.word_count, request.tone.as_deref());
    let content = write_blog(&state.registry, &state.config.sampling(), &prompt).await?;
    Ok(Json(BlogResponse { content }))
}

async fn metadata(State(state): State<AppState>) -> Json<MetadataResponse> {
    Json(MetadataResponse {
        model: state.registry.metadata(),
        sampling: state.config.sampling(),
    })
}
