//! Capability flags reported per model

use std::fmt;

use serde::{Deserialize, Serialize};

/// An API capability a model may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    Vision,
    ToolUse,
    StreamingToolUse,
    Guardrails,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Converse,
        Feature::ConverseStream,
        Feature::SystemPrompts,
        Feature::DocumentChat,
        Feature::Vision,
        Feature::ToolUse,
        Feature::StreamingToolUse,
        Feature::Guardrails,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Converse => "converse",
            Self::ConverseStream => "converse_stream",
            Self::SystemPrompts => "system_prompts",
            Self::DocumentChat => "document_chat",
            Self::Vision => "vision",
            Self::ToolUse => "tool_use",
            Self::StreamingToolUse => "streaming_tool_use",
            Self::Guardrails => "guardrails",
        }
    }

    /// Unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feature| feature.as_str() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of supported features, everything else is unsupported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    bits: u8,
}

impl FeatureSet {
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    pub fn of(features: &[Feature]) -> Self {
        features
            .iter()
            .fold(Self::none(), |set, feature| set.with(*feature))
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.bits |= Self::bit(feature);
        self
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.bits & Self::bit(feature) != 0
    }

    /// Lookup by feature name; unrecognized names are unsupported
    pub fn supports_name(&self, name: &str) -> bool {
        Feature::parse(name).is_some_and(|feature| self.supports(feature))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        Feature::ALL
            .into_iter()
            .map(|feature| (feature, self.supports(feature)))
    }

    fn bit(feature: Feature) -> u8 {
        1 << feature as u8
    }
}
