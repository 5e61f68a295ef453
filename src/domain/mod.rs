//! Domain layer - model capabilities and conversation integrity rules

pub mod conversation;
pub mod error;
pub mod model;

pub use conversation::{
    update_with, validate_conversation_structure, ContentBlock, Conversation, ConversationId,
    ConversationMessage, ConversationRepository, ConversationUpdate, ImportError,
    PackageSecurity, Role, SecureConversationPackage, StructuralError, PACKAGE_VERSION,
};
#[cfg(test)]
pub use conversation::MockConversationRepository;
pub use error::DomainError;
pub use model::{
    CatalogError, Feature, FeatureSet, FoundationModel, InferenceParameter, InferenceParameters,
    InferenceSettings, ModelCatalog, ParameterBounds, ParameterKind, ParameterProfile, Provider,
};
