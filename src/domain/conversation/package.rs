//! Signed conversation export format

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format version written into every package
pub const PACKAGE_VERSION: &str = "1.0";

/// Tamper-evident conversation export
///
/// The signature covers `messages` only; `version` and `timestamp` may
/// differ between packages with the same signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecureConversationPackage {
    pub version: String,
    pub timestamp: String,
    pub messages: Vec<Value>,
    pub security: PackageSecurity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSecurity {
    /// Lowercase hex MAC of the canonical messages
    pub signature: String,
}

impl SecureConversationPackage {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
