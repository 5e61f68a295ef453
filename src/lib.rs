//! Bedrock Playground
//!
//! Capability registry for hosted foundation models plus tamper-evident
//! export and import of conversation transcripts.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::{DomainError, ModelCatalog};
use infrastructure::conversation::{ConversationImporter, InMemoryConversationRepository};
use infrastructure::security::ConversationEnvelope;
use infrastructure::services::ConversationService;

/// Create the application state from configuration
pub fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let catalog = Arc::new(ModelCatalog::builtin());
    info!(model_count = catalog.len(), "Loaded model catalog");

    let envelope = Arc::new(ConversationEnvelope::from_config(&config.security)?);
    info!(algorithm = %envelope.algorithm(), "Conversation signing enabled");

    let importer = ConversationImporter::new(envelope, config.conversation.max_messages);
    let conversation_service = Arc::new(ConversationService::new(
        Arc::new(
            InMemoryConversationRepository::new()
                .with_max_sessions(config.conversation.max_sessions),
        ),
        importer,
    ));

    Ok(AppState::new(catalog, conversation_service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_app_state_requires_secret() {
        let result = create_app_state(&AppConfig::default());
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_create_app_state() {
        let mut config = AppConfig::default();
        config.security.secret_key = "secret".to_string();

        let state = create_app_state(&config).unwrap();
        assert!(!state.catalog.is_empty());
        assert_eq!(state.conversation_service.importer().max_messages(), 100);
    }
}
