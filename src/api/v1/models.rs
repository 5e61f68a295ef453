//! Model catalog endpoint handlers

use std::borrow::Cow;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ModelDetail, ModelSummary, ModelsResponse};
use crate::domain::{FoundationModel, InferenceSettings};

/// GET /v1/models
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    debug!("Listing catalog models");

    let models = state.catalog.iter().map(ModelSummary::from_domain).collect();
    Json(ModelsResponse::new(models))
}

/// GET /v1/models/{model_id}
pub async fn get_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<ModelDetail>, ApiError> {
    debug!(model_id = %model_id, "Getting model");

    let model = find_model(&state, &model_id)?;
    Ok(Json(ModelDetail::from_domain(model)))
}

/// POST /v1/models/{model_id}/inference-config
///
/// Ids missing from the catalog use the parameter ranges of their provider
/// prefix.
pub async fn build_inference_config(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    Json(settings): Json<InferenceSettings>,
) -> Json<Map<String, Value>> {
    let model = state.catalog.resolve(&model_id);
    let config = model.inference_config(&settings);

    debug!(
        model_id = %model_id,
        listed = matches!(model, Cow::Borrowed(_)),
        parameter_count = config.len(),
        "Built inference config"
    );
    Json(config)
}

fn find_model<'a>(state: &'a AppState, model_id: &str) -> Result<&'a FoundationModel, ApiError> {
    state.catalog.find(model_id).ok_or_else(|| {
        ApiError::not_found(format!("Model '{}' not found", model_id)).with_param("model_id")
    })
}
