//! Model catalog response types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FoundationModel, InferenceParameter, InferenceSettings};

/// Catalog list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: String,
    pub provider: String,
    pub features: BTreeMap<String, bool>,
}

impl ModelSummary {
    pub fn from_domain(model: &FoundationModel) -> Self {
        Self {
            id: model.model_id().to_string(),
            provider: model.provider().to_string(),
            features: features(model),
        }
    }
}

/// Full model entry including parameter ranges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDetail {
    pub id: String,
    pub provider: String,
    pub features: BTreeMap<String, bool>,
    pub parameters: BTreeMap<String, ParameterInfo>,
    /// Starting values for the supported parameters, keyed like a settings request
    pub defaults: InferenceSettings,
}

impl ModelDetail {
    pub fn from_domain(model: &FoundationModel) -> Self {
        Self {
            id: model.model_id().to_string(),
            provider: model.provider().to_string(),
            features: features(model),
            parameters: model
                .parameters()
                .iter()
                .map(|(kind, parameter)| {
                    (kind.as_str().to_string(), ParameterInfo::from_domain(parameter))
                })
                .collect(),
            defaults: model.parameters().defaults(),
        }
    }
}

/// Parameter as shown to clients; ranges only for supported parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ParameterInfo {
    pub fn from_domain(parameter: &InferenceParameter) -> Self {
        let bounds = parameter.bounds();

        Self {
            name: parameter.name().to_string(),
            supported: parameter.is_supported(),
            min: bounds.map(|b| b.min),
            default: bounds.map(|b| b.default),
            max: bounds.map(|b| b.max),
        }
    }
}

/// List response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelSummary>,
}

impl ModelsResponse {
    pub fn new(data: Vec<ModelSummary>) -> Self {
        Self {
            object: "list".to_string(),
            data,
        }
    }
}

fn features(model: &FoundationModel) -> BTreeMap<String, bool> {
    model
        .features()
        .iter()
        .map(|(feature, supported)| (feature.as_str().to_string(), supported))
        .collect()
}
