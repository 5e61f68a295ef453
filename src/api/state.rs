//! Application state for shared services

use std::sync::Arc;

use crate::domain::ModelCatalog;
use crate::infrastructure::services::ConversationService;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ModelCatalog>,
    pub conversation_service: Arc<ConversationService>,
}

impl AppState {
    pub fn new(catalog: Arc<ModelCatalog>, conversation_service: Arc<ConversationService>) -> Self {
        Self {
            catalog,
            conversation_service,
        }
    }
}
