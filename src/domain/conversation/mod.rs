//! Conversation domain - transcripts, signed exports and structural rules

mod entity;
mod error;
mod message;
mod package;
mod repository;
mod validation;

pub use entity::{Conversation, ConversationId};
pub use error::ImportError;
pub use message::{ContentBlock, ConversationMessage, Role};
pub use package::{PackageSecurity, SecureConversationPackage, PACKAGE_VERSION};
pub use repository::{update_with, ConversationRepository, ConversationUpdate};
#[cfg(test)]
pub use repository::MockConversationRepository;
pub use validation::{validate_conversation_structure, StructuralError};
