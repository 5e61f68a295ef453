//! Conversation storage and import

mod importer;
mod in_memory;

pub use importer::ConversationImporter;
pub use in_memory::InMemoryConversationRepository;
