//! v1 API endpoints

pub mod conversations;
pub mod models;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/models", get(models::list_models))
        .route("/models/{model_id}", get(models::get_model))
        .route(
            "/models/{model_id}/inference-config",
            post(models::build_inference_config),
        )
        .route("/conversations", post(conversations::create_conversation))
        .route("/conversations/verify", post(conversations::verify_conversation))
        .route(
            "/conversations/{conversation_id}",
            get(conversations::get_conversation).delete(conversations::delete_conversation),
        )
        .route(
            "/conversations/{conversation_id}/messages",
            post(conversations::append_message).delete(conversations::clear_messages),
        )
        .route(
            "/conversations/{conversation_id}/export",
            get(conversations::export_conversation),
        )
        .route(
            "/conversations/{conversation_id}/import",
            post(conversations::import_conversation),
        )
}
