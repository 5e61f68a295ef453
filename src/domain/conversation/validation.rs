//! Structural checks for imported transcripts

use serde_json::Value;
use thiserror::Error;

use super::message::Role;

/// First structural rule a transcript breaks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("Invalid conversation format: messages must be a list")]
    InvalidFormat,

    #[error("Conversation too long: {count} messages exceeds the limit of {max}")]
    TooLong { count: usize, max: usize },

    #[error("Message at index {index} must be an object with 'role' and 'content' fields")]
    MissingFields { index: usize },

    #[error(
        "Message at index {index} has invalid role {role}: expected 'user', 'assistant' or 'system'"
    )]
    InvalidRole { index: usize, role: String },

    #[error("Message at index {index} has invalid content: content must be a list")]
    InvalidContent { index: usize },

    #[error(
        "Message at index {index} has invalid content item {item}: each item must be an object with a 'text' field"
    )]
    InvalidContentItem { index: usize, item: usize },
}

impl StructuralError {
    /// Stable rule identifier
    pub fn rule(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::TooLong { .. } => "too_long",
            Self::MissingFields { .. } => "missing_fields",
            Self::InvalidRole { .. } => "invalid_role",
            Self::InvalidContent { .. } => "invalid_content",
            Self::InvalidContentItem { .. } => "invalid_content_item",
        }
    }
}

/// Check a transcript against the message schema, stopping at the first violation.
///
/// Role alternation is not checked. Only the `text` key of content items is
/// required; image and document payloads are not inspected.
pub fn validate_conversation_structure(
    messages: &Value,
    max_messages: usize,
) -> Result<(), StructuralError> {
    let messages = messages.as_array().ok_or(StructuralError::InvalidFormat)?;

    if messages.len() > max_messages {
        return Err(StructuralError::TooLong {
            count: messages.len(),
            max: max_messages,
        });
    }

    for (index, message) in messages.iter().enumerate() {
        let fields = message
            .as_object()
            .filter(|fields| fields.contains_key("role") && fields.contains_key("content"))
            .ok_or(StructuralError::MissingFields { index })?;

        let role = &fields["role"];
        if role.as_str().and_then(Role::parse).is_none() {
            return Err(StructuralError::InvalidRole {
                index,
                role: role.to_string(),
            });
        }

        let content = fields["content"]
            .as_array()
            .ok_or(StructuralError::InvalidContent { index })?;

        for (item, block) in content.iter().enumerate() {
            let has_text = block
                .as_object()
                .is_some_and(|block| block.contains_key("text"));

            if !has_text {
                return Err(StructuralError::InvalidContentItem { index, item });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MAX: usize = 10;

    fn check(messages: Value) -> Result<(), StructuralError> {
        validate_conversation_structure(&messages, MAX)
    }

    #[test]
    fn test_valid_transcript() {
        let messages = json!([
            {"role": "system", "content": [{"text": "Be brief."}]},
            {"role": "user", "content": [{"text": "hi"}, {"text": "see file", "document": {"name": "a.pdf"}}]},
            {"role": "assistant", "content": [{"text": "hello"}]}
        ]);

        assert_eq!(check(messages), Ok(()));
    }

    #[test]
    fn test_empty_transcript_is_valid() {
        assert_eq!(check(json!([])), Ok(()));
    }

    #[test]
    fn test_alternation_is_not_enforced() {
        let messages = json!([
            {"role": "user", "content": [{"text": "one"}]},
            {"role": "user", "content": [{"text": "two"}]}
        ]);

        assert_eq!(check(messages), Ok(()));
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(check(json!({"role": "user"})), Err(StructuralError::InvalidFormat));
        assert_eq!(check(json!("messages")), Err(StructuralError::InvalidFormat));
    }

    #[test]
    fn test_too_long() {
        let messages = Value::Array(vec![json!({"role": "user", "content": [{"text": "hi"}]}); MAX + 1]);

        assert_eq!(
            check(messages),
            Err(StructuralError::TooLong {
                count: MAX + 1,
                max: MAX
            })
        );
    }

    #[test]
    fn test_exactly_max_is_allowed() {
        let messages = Value::Array(vec![json!({"role": "user", "content": [{"text": "hi"}]}); MAX]);

        assert_eq!(check(messages), Ok(()));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            check(json!([{"role": "user"}])),
            Err(StructuralError::MissingFields { index: 0 })
        );
        assert_eq!(
            check(json!([{"role": "user", "content": [{"text": "a"}]}, "hello"])),
            Err(StructuralError::MissingFields { index: 1 })
        );
    }

    #[test]
    fn test_invalid_role() {
        let err = check(json!([{"role": "coach", "content": [{"text": "hi"}]}])).unwrap_err();

        assert_eq!(
            err,
            StructuralError::InvalidRole {
                index: 0,
                role: "\"coach\"".to_string()
            }
        );
        assert_eq!(err.rule(), "invalid_role");
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn test_non_string_role() {
        assert_eq!(
            check(json!([{"role": 7, "content": [{"text": "hi"}]}])),
            Err(StructuralError::InvalidRole {
                index: 0,
                role: "7".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_content() {
        assert_eq!(
            check(json!([{"role": "user", "content": "hi"}])),
            Err(StructuralError::InvalidContent { index: 0 })
        );
    }

    #[test]
    fn test_invalid_content_item() {
        assert_eq!(
            check(json!([{"role": "user", "content": [{"text": "a"}, {"image": {}}]}])),
            Err(StructuralError::InvalidContentItem { index: 0, item: 1 })
        );
        assert_eq!(
            check(json!([{"role": "user", "content": ["a"]}])),
            Err(StructuralError::InvalidContentItem { index: 0, item: 0 })
        );
    }

    #[test]
    fn test_first_violation_wins() {
        // Too long and also carrying a bad role: the length rule is checked first.
        let mut messages = vec![json!({"role": "coach", "content": [{"text": "hi"}]})];
        messages.extend(vec![json!({"role": "user", "content": []}); MAX]);

        assert_eq!(check(Value::Array(messages)).unwrap_err().rule(), "too_long");
    }
}
