//! Model providers and the parameter profile each one implies

use std::fmt;

use serde::{Deserialize, Serialize};

use super::parameter::{InferenceParameter, InferenceParameters};

/// Mistral model ids that use the large-model parameter ranges.
///
/// Membership is exact; every other Mistral id gets the instruct ranges.
pub const MISTRAL_LARGE_MODELS: &[&str] = &[
    "mistral.mistral-large-2402-v1:0",
    "mistral.mistral-large-2402",
    "mistral.mistral-small-2402-v1:0",
    "mistral.mistral-small-2402",
];

/// Vendor that publishes a foundation model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    Anthropic,
    Meta,
    Mistral,
    Cohere,
    Ai21,
    Amazon,
    Other(String),
}

impl Provider {
    /// Display name used in the catalog and on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::Meta => "Meta",
            Self::Mistral => "Mistral",
            Self::Cohere => "Cohere",
            Self::Ai21 => "AI21",
            Self::Amazon => "Amazon",
            Self::Other(name) => name,
        }
    }

    /// Parse a provider name, keeping unrecognized names as `Other`
    pub fn parse(name: &str) -> Self {
        const KNOWN: [(&str, Provider); 6] = [
            ("anthropic", Provider::Anthropic),
            ("meta", Provider::Meta),
            ("mistral", Provider::Mistral),
            ("cohere", Provider::Cohere),
            ("ai21", Provider::Ai21),
            ("amazon", Provider::Amazon),
        ];

        KNOWN
            .into_iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, provider)| provider)
            .unwrap_or_else(|| Self::Other(name.to_string()))
    }

    /// Infer the provider from a `vendor.model` style identifier
    pub fn from_model_id(model_id: &str) -> Self {
        let vendor = model_id.split('.').next().unwrap_or_default();
        Self::parse(vendor)
    }
}

impl From<String> for Provider {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter set selected for a model, derived once from its provider and id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterProfile {
    Anthropic,
    Meta,
    Mistral { large: bool },
    Cohere,
    /// AI21, Amazon and unrecognized providers.
    ///
    /// Reuses the Anthropic ranges; these are not the published limits of
    /// those providers.
    UnknownProviderDefaults,
}

impl ParameterProfile {
    pub fn derive(provider: &Provider, model_id: &str) -> Self {
        match provider {
            Provider::Anthropic => Self::Anthropic,
            Provider::Meta => Self::Meta,
            Provider::Mistral => Self::Mistral {
                large: MISTRAL_LARGE_MODELS.contains(&model_id),
            },
            Provider::Cohere => Self::Cohere,
            Provider::Ai21 | Provider::Amazon | Provider::Other(_) => {
                Self::UnknownProviderDefaults
            }
        }
    }

    /// Build the four inference parameters for this profile
    pub fn parameters(self) -> InferenceParameters {
        match self {
            Self::Anthropic | Self::UnknownProviderDefaults => InferenceParameters::new(
                InferenceParameter::supported("max_tokens_to_sample", 0.0, 2048.0, 4096.0),
                InferenceParameter::supported("temperature", 0.0, 1.0, 1.0),
                InferenceParameter::supported("top_p", 0.0, 1.0, 1.0),
                InferenceParameter::supported("top_k", 0.0, 250.0, 500.0),
            ),
            Self::Meta => InferenceParameters::new(
                InferenceParameter::supported("max_gen_len", 1.0, 1024.0, 2048.0),
                InferenceParameter::supported("temperature", 0.0, 0.5, 1.0),
                InferenceParameter::supported("top_p", 0.0, 0.9, 1.0),
                InferenceParameter::unsupported("top_k"),
            ),
            Self::Mistral { large: true } => InferenceParameters::new(
                InferenceParameter::supported("max_tokens", 1.0, 4098.0, 8192.0),
                InferenceParameter::supported("temperature", 0.0, 0.7, 1.0),
                InferenceParameter::supported("top_p", 0.0, 1.0, 1.0),
                InferenceParameter::unsupported("top_k"),
            ),
            Self::Mistral { large: false } => InferenceParameters::new(
                InferenceParameter::supported("max_tokens", 1.0, 512.0, 8192.0),
                InferenceParameter::supported("temperature", 0.0, 0.5, 1.0),
                InferenceParameter::supported("top_p", 0.0, 0.9, 1.0),
                InferenceParameter::supported("top_k", 0.0, 50.0, 50.0),
            ),
            Self::Cohere => InferenceParameters::new(
                InferenceParameter::supported("max_tokens", 1.0, 2048.0, 4096.0),
                InferenceParameter::supported("temperature", 0.0, 0.9, 5.0),
                InferenceParameter::supported("p", 0.0, 0.75, 1.0),
                InferenceParameter::supported("k", 0.0, 0.0, 500.0),
            ),
        }
    }
}
