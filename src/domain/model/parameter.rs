//! Inference parameters and their valid ranges

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logical parameter names shared by every model in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParameterKind {
    MaxTokensToSample,
    Temperature,
    TopP,
    TopK,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 4] = [
        ParameterKind::MaxTokensToSample,
        ParameterKind::Temperature,
        ParameterKind::TopP,
        ParameterKind::TopK,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxTokensToSample => "MaxTokensToSample",
            Self::Temperature => "Temperature",
            Self::TopP => "TopP",
            Self::TopK => "TopK",
        }
    }

    /// Whether values of this parameter are whole numbers on the wire
    pub fn is_integral(&self) -> bool {
        matches!(self, Self::MaxTokensToSample | Self::TopK)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// Usable range of a supported parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterBounds {
    pub min: f64,
    pub default: f64,
    pub max: f64,
}

/// A provider-specific inference parameter
///
/// When `supported` is false the numeric fields are placeholders and are
/// only reachable through the raw accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceParameter {
    name: String,
    min_value: f64,
    default_value: f64,
    max_value: f64,
    supported: bool,
}

impl InferenceParameter {
    pub fn supported(name: impl Into<String>, min: f64, default: f64, max: f64) -> Self {
        debug_assert!(min <= default && default <= max);
        Self {
            name: name.into(),
            min_value: min,
            default_value: default,
            max_value: max,
            supported: true,
        }
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_value: 0.0,
            default_value: 0.0,
            max_value: 0.0,
            supported: false,
        }
    }

    /// Wire-level field name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn bounds(&self) -> Option<ParameterBounds> {
        self.supported.then_some(ParameterBounds {
            min: self.min_value,
            default: self.default_value,
            max: self.max_value,
        })
    }

    /// Clamp a requested value into range. `None` when unsupported.
    pub fn clamp(&self, value: f64) -> Option<f64> {
        let bounds = self.bounds()?;

        if value.is_nan() {
            return Some(bounds.default);
        }

        Some(value.clamp(bounds.min, bounds.max))
    }
}

/// Requested values keyed by logical parameter, all optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<f64>,
}

impl InferenceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, value: f64) -> Self {
        self.max_tokens = Some(value);
        self
    }

    pub fn with_temperature(mut self, value: f64) -> Self {
        self.temperature = Some(value);
        self
    }

    pub fn with_top_p(mut self, value: f64) -> Self {
        self.top_p = Some(value);
        self
    }

    pub fn with_top_k(mut self, value: f64) -> Self {
        self.top_k = Some(value);
        self
    }

    pub fn get(&self, kind: ParameterKind) -> Option<f64> {
        match kind {
            ParameterKind::MaxTokensToSample => self.max_tokens,
            ParameterKind::Temperature => self.temperature,
            ParameterKind::TopP => self.top_p,
            ParameterKind::TopK => self.top_k,
        }
    }

    fn set(&mut self, kind: ParameterKind, value: f64) {
        let slot = match kind {
            ParameterKind::MaxTokensToSample => &mut self.max_tokens,
            ParameterKind::Temperature => &mut self.temperature,
            ParameterKind::TopP => &mut self.top_p,
            ParameterKind::TopK => &mut self.top_k,
        };
        *slot = Some(value);
    }
}

/// The four parameters of a model, one entry per logical name
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceParameters {
    max_tokens: InferenceParameter,
    temperature: InferenceParameter,
    top_p: InferenceParameter,
    top_k: InferenceParameter,
}

impl InferenceParameters {
    pub fn new(
        max_tokens: InferenceParameter,
        temperature: InferenceParameter,
        top_p: InferenceParameter,
        top_k: InferenceParameter,
    ) -> Self {
        Self {
            max_tokens,
            temperature,
            top_p,
            top_k,
        }
    }

    pub fn get(&self, kind: ParameterKind) -> &InferenceParameter {
        match kind {
            ParameterKind::MaxTokensToSample => &self.max_tokens,
            ParameterKind::Temperature => &self.temperature,
            ParameterKind::TopP => &self.top_p,
            ParameterKind::TopK => &self.top_k,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, &InferenceParameter)> {
        ParameterKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Default values for every supported parameter
    pub fn defaults(&self) -> InferenceSettings {
        let mut settings = InferenceSettings::new();

        for (kind, parameter) in self.iter() {
            if let Some(bounds) = parameter.bounds() {
                settings.set(kind, bounds.default);
            }
        }

        settings
    }
}
