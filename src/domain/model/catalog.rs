//! Read-only catalog of foundation models

use std::borrow::Cow;
use std::collections::HashMap;

use thiserror::Error;

use super::builtin::builtin_models;
use super::entity::FoundationModel;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Model '{0}' is listed more than once")]
    DuplicateModel(String),
}

/// Immutable model registry, built once and shared by reference
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<FoundationModel>,
    index: HashMap<String, usize>,
}

impl ModelCatalog {
    /// Catalog with the models this application ships with
    pub fn builtin() -> Self {
        let models = builtin_models();
        let index = models
            .iter()
            .enumerate()
            .map(|(position, model)| (model.model_id().to_string(), position))
            .collect();

        Self { models, index }
    }

    /// Build a catalog from an explicit model list, keeping the given order
    pub fn from_models(models: Vec<FoundationModel>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(models.len());

        for (position, model) in models.iter().enumerate() {
            if index.insert(model.model_id().to_string(), position).is_some() {
                return Err(CatalogError::DuplicateModel(model.model_id().to_string()));
            }
        }

        Ok(Self { models, index })
    }

    /// Exact-match lookup. Absence is the only failure signal.
    pub fn find(&self, model_id: &str) -> Option<&FoundationModel> {
        self.index.get(model_id).map(|&position| &self.models[position])
    }

    /// Catalog entry, or a generic entry with no features for unknown ids
    pub fn resolve<'a>(&'a self, model_id: &str) -> Cow<'a, FoundationModel> {
        match self.find(model_id) {
            Some(model) => Cow::Borrowed(model),
            None => Cow::Owned(FoundationModel::generic(model_id)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoundationModel> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
