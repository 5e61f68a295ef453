//! HMAC envelope for exported conversations

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use super::algorithm::HashAlgorithm;
use super::canonical::to_canonical_json_seq;
use crate::config::SecurityConfig;
use crate::domain::{DomainError, PackageSecurity, SecureConversationPackage, PACKAGE_VERSION};

/// Outcome of checking a package, kept for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Verified,
    Failed(VerificationFailure),
}

/// Why a package did not verify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    NotAnObject,
    MissingMessages,
    MessagesNotList,
    MissingSignature,
    SignatureNotHex,
    SignatureMismatch,
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NotAnObject => "package is not a JSON object",
            Self::MissingMessages => "package has no 'messages' field",
            Self::MessagesNotList => "'messages' is not a list",
            Self::MissingSignature => "package has no 'security.signature' string",
            Self::SignatureNotHex => "signature is not lowercase hex",
            Self::SignatureMismatch => "signature does not match messages",
        };
        f.write_str(reason)
    }
}

/// Signs and verifies conversation transcripts
///
/// The MAC key is `salt || secret_key`; the MAC input is the canonical JSON
/// of the message list.
#[derive(Clone)]
pub struct ConversationEnvelope {
    key: Vec<u8>,
    algorithm: HashAlgorithm,
}

impl ConversationEnvelope {
    pub fn new(
        secret_key: &str,
        salt: &str,
        algorithm: HashAlgorithm,
    ) -> Result<Self, DomainError> {
        if secret_key.is_empty() {
            return Err(DomainError::configuration(
                "Conversation signing requires a non-empty secret key",
            ));
        }

        let mut key = Vec::with_capacity(salt.len() + secret_key.len());
        key.extend_from_slice(salt.as_bytes());
        key.extend_from_slice(secret_key.as_bytes());

        Ok(Self { key, algorithm })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, DomainError> {
        let algorithm = config.algorithm.parse()?;
        Self::new(&config.secret_key, &config.salt, algorithm)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Lowercase hex MAC over the canonical form of `messages`
    pub fn generate_signature(&self, messages: &[Value]) -> String {
        let canonical = to_canonical_json_seq(messages);
        hex::encode(self.algorithm.sign(&self.key, canonical.as_bytes()))
    }

    /// Wrap a transcript into a signed package stamped with the current time
    pub fn secure_conversation(&self, messages: &[Value]) -> SecureConversationPackage {
        let signature = self.generate_signature(messages);

        debug!(
            message_count = messages.len(),
            algorithm = %self.algorithm,
            "Signed conversation"
        );

        SecureConversationPackage {
            version: PACKAGE_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            messages: messages.to_vec(),
            security: PackageSecurity { signature },
        }
    }

    /// True only if the package is well formed and its signature matches.
    ///
    /// Malformed and tampered packages are both reported as `false`; the
    /// reason is logged.
    pub fn verify_conversation(&self, package: &Value) -> bool {
        match self.check(package) {
            Verification::Verified => true,
            Verification::Failed(reason) => {
                warn!(%reason, "Conversation verification failed");
                false
            }
        }
    }

    /// Typed variant of [`Self::verify_conversation`]
    pub fn verify_package(&self, package: &SecureConversationPackage) -> bool {
        match self.check_signature(&package.messages, &package.security.signature) {
            Verification::Verified => true,
            Verification::Failed(reason) => {
                warn!(%reason, "Conversation verification failed");
                false
            }
        }
    }

    /// Full verification outcome for a raw package
    pub fn check(&self, package: &Value) -> Verification {
        let Some(fields) = package.as_object() else {
            return Verification::Failed(VerificationFailure::NotAnObject);
        };

        let Some(messages) = fields.get("messages") else {
            return Verification::Failed(VerificationFailure::MissingMessages);
        };

        let Some(messages) = messages.as_array() else {
            return Verification::Failed(VerificationFailure::MessagesNotList);
        };

        let signature = fields
            .get("security")
            .and_then(|security| security.get("signature"))
            .and_then(Value::as_str);

        let Some(signature) = signature else {
            return Verification::Failed(VerificationFailure::MissingSignature);
        };

        self.check_signature(messages, signature)
    }

    fn check_signature(&self, messages: &[Value], signature: &str) -> Verification {
        // Signatures are only ever emitted as lowercase hex.
        let lowercase_hex = signature
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

        let tag = match hex::decode(signature) {
            Ok(tag) if lowercase_hex => tag,
            _ => return Verification::Failed(VerificationFailure::SignatureNotHex),
        };

        let canonical = to_canonical_json_seq(messages);

        if self.algorithm.verify(&self.key, canonical.as_bytes(), &tag) {
            Verification::Verified
        } else {
            Verification::Failed(VerificationFailure::SignatureMismatch)
        }
    }
}

impl fmt::Debug for ConversationEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationEnvelope")
            .field("key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn envelope() -> ConversationEnvelope {
        ConversationEnvelope::new("test-secret", "test-salt", HashAlgorithm::Sha256).unwrap()
    }

    fn transcript() -> Vec<Value> {
        vec![
            json!({"role": "user", "content": [{"text": "What is Amazon Bedrock?"}]}),
            json!({"role": "assistant", "content": [{"text": "A managed service for foundation models."}]}),
        ]
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let result = ConversationEnvelope::new("", "salt", HashAlgorithm::Sha256);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_from_config_rejects_unknown_algorithm() {
        let config = SecurityConfig {
            secret_key: "secret".to_string(),
            salt: String::new(),
            algorithm: "md5".to_string(),
        };

        assert!(ConversationEnvelope::from_config(&config).is_err());
    }

    #[test]
    fn test_signature_matches_manual_hmac() {
        let messages = vec![json!({"role": "user", "content": [{"text": "hi"}]})];
        let canonical = r#"[{"content": [{"text": "hi"}], "role": "user"}]"#;
        let expected =
            hex::encode(HashAlgorithm::Sha256.sign(b"test-salttest-secret", canonical.as_bytes()));

        assert_eq!(envelope().generate_signature(&messages), expected);
    }

    #[test]
    fn test_signature_is_deterministic() {
        let envelope = envelope();
        assert_eq!(
            envelope.generate_signature(&transcript()),
            envelope.generate_signature(&transcript())
        );
    }

    #[test]
    fn test_signature_ignores_key_insertion_order() {
        let mut forward = Map::new();
        forward.insert("role".to_string(), json!("user"));
        forward.insert("content".to_string(), json!([{"text": "hi", "image": {"format": "png"}}]));

        let mut reverse = Map::new();
        reverse.insert("content".to_string(), json!([{"image": {"format": "png"}, "text": "hi"}]));
        reverse.insert("role".to_string(), json!("user"));

        let envelope = envelope();
        assert_eq!(
            envelope.generate_signature(&[Value::Object(forward)]),
            envelope.generate_signature(&[Value::Object(reverse)])
        );
    }

    #[test]
    fn test_signature_depends_on_key_material() {
        let other = ConversationEnvelope::new("test-secret", "other-salt", HashAlgorithm::Sha256).unwrap();
        assert_ne!(
            envelope().generate_signature(&transcript()),
            other.generate_signature(&transcript())
        );
    }

    #[test]
    fn test_secure_conversation_round_trip() {
        let envelope = envelope();
        let package = envelope.secure_conversation(&transcript());

        assert_eq!(package.version, "1.0");
        assert_eq!(package.messages, transcript());
        assert!(package.timestamp.ends_with('Z'));
        assert!(envelope.verify_package(&package));
        assert!(envelope.verify_conversation(&serde_json::to_value(&package).unwrap()));
    }

    #[test]
    fn test_signature_ignores_timestamp_and_version() {
        let envelope = envelope();
        let mut first = serde_json::to_value(envelope.secure_conversation(&transcript())).unwrap();
        let second = envelope.secure_conversation(&transcript());

        assert_eq!(first["security"]["signature"], second.security.signature.as_str());

        first["timestamp"] = json!("1999-01-01T00:00:00");
        first["version"] = json!("0.9");
        assert!(envelope.verify_conversation(&first));
    }

    #[test]
    fn test_any_text_change_is_detected() {
        let envelope = envelope();
        let original = serde_json::to_value(envelope.secure_conversation(&transcript())).unwrap();

        for index in 0..2 {
            let text = original["messages"][index]["content"][0]["text"]
                .as_str()
                .unwrap()
                .to_string();

            for (position, c) in text.char_indices() {
                let replacement = if c == 'x' { 'y' } else { 'x' };
                let mut tampered_text = text.clone();
                tampered_text.replace_range(position..position + c.len_utf8(), &replacement.to_string());

                let mut tampered = original.clone();
                tampered["messages"][index]["content"][0]["text"] = json!(tampered_text);

                assert_eq!(
                    envelope.check(&tampered),
                    Verification::Failed(VerificationFailure::SignatureMismatch)
                );
            }
        }
    }

    #[test]
    fn test_uppercase_signature_is_rejected() {
        let envelope = envelope();
        let mut package = serde_json::to_value(envelope.secure_conversation(&transcript())).unwrap();
        let upper = package["security"]["signature"]
            .as_str()
            .unwrap()
            .to_ascii_uppercase();
        package["security"]["signature"] = json!(upper);

        assert_eq!(
            envelope.check(&package),
            Verification::Failed(VerificationFailure::SignatureNotHex)
        );
        assert!(!envelope.verify_conversation(&package));
    }

    #[test]
    fn test_reordered_messages_are_detected() {
        let envelope = envelope();
        let mut package = serde_json::to_value(envelope.secure_conversation(&transcript())).unwrap();
        package["messages"].as_array_mut().unwrap().reverse();

        assert!(!envelope.verify_conversation(&package));
    }

    #[test]
    fn test_malformed_packages_fail_closed() {
        let envelope = envelope();
        let signature = envelope.generate_signature(&transcript());

        let cases = [
            (json!([]), VerificationFailure::NotAnObject),
            (json!({"security": {"signature": signature}}), VerificationFailure::MissingMessages),
            (
                json!({"messages": "hi", "security": {"signature": signature}}),
                VerificationFailure::MessagesNotList,
            ),
            (json!({"messages": transcript()}), VerificationFailure::MissingSignature),
            (
                json!({"messages": transcript(), "security": {"signature": 42}}),
                VerificationFailure::MissingSignature,
            ),
            (
                json!({"messages": transcript(), "security": {"signature": "zz"}}),
                VerificationFailure::SignatureNotHex,
            ),
            (
                json!({"messages": transcript(), "security": {"signature": &signature[..16]}}),
                VerificationFailure::SignatureMismatch,
            ),
        ];

        for (package, reason) in cases {
            assert_eq!(envelope.check(&package), Verification::Failed(reason));
            assert!(!envelope.verify_conversation(&package));
        }
    }

    #[test]
    fn test_other_algorithms_round_trip() {
        for algorithm in [HashAlgorithm::Sha384, HashAlgorithm::Sha512, HashAlgorithm::Sha224] {
            let envelope = ConversationEnvelope::new("secret", "", algorithm).unwrap();
            let package = envelope.secure_conversation(&transcript());

            assert!(envelope.verify_package(&package), "{}", algorithm);
        }
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", envelope());
        assert!(!rendered.contains("test-secret"));
    }
}
