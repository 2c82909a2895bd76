use axum::{extract::State, response::Json};
use fuzzy_infer::KnowledgeBaseDefinition;

use crate::server::AppState;

/// Active knowledge base
///
/// Linguistic variables with their universes and membership functions,
/// followed by the rules in evaluation order. The same document can be saved
/// as YAML and used as a custom knowledge base.
#[utoipa::path(
    get,
    path = "/api/knowledge-base",
    responses(
        (status = 200, description = "Variables and rules", content_type = "application/json"),
    ),
    tag = "Inference"
)]
pub async fn handle_knowledge_base(State(state): State<AppState>) -> Json<KnowledgeBaseDefinition> {
    Json(state.pipeline.knowledge_base().clone().into())
}
