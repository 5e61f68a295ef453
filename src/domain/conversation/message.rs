//! Conversation messages as exchanged with a chat model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }

    /// Case-sensitive; only the lowercase names are valid
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// One content block of a message
///
/// Image and document payloads are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
            document: None,
        }
    }
}

/// A role-tagged conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl ConversationMessage {
    pub fn new(role: Role, content: Vec<ContentBlock>) -> Self {
        Self { role, content }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![ContentBlock::text(text)])
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![ContentBlock::text(text)])
    }

    /// Text of all blocks joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "role": self.role.as_str(),
            "content": self
                .content
                .iter()
                .map(ContentBlock::to_value)
                .collect::<Vec<_>>(),
        })
    }
}

impl ContentBlock {
    fn to_value(&self) -> Value {
        let mut block = serde_json::Map::new();
        block.insert("text".to_string(), Value::String(self.text.clone()));

        if let Some(image) = &self.image {
            block.insert("image".to_string(), image.clone());
        }

        if let Some(document) = &self.document {
            block.insert("document".to_string(), document.clone());
        }

        Value::Object(block)
    }
}
