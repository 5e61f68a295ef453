//! Model domain - foundation model capabilities and inference parameters

mod builtin;
mod catalog;
mod entity;
mod feature;
mod parameter;
mod provider;

pub use catalog::{CatalogError, ModelCatalog};
pub use entity::FoundationModel;
pub use feature::{Feature, FeatureSet};
pub use parameter::{
    InferenceParameter, InferenceParameters, InferenceSettings, ParameterBounds, ParameterKind,
};
pub use provider::{ParameterProfile, Provider, MISTRAL_LARGE_MODELS};
