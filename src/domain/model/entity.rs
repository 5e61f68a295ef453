//! Foundation model entity

use serde_json::{Map, Number, Value};

use super::feature::{Feature, FeatureSet};
use super::parameter::{
    InferenceParameter, InferenceParameters, InferenceSettings, ParameterKind,
};
use super::provider::{ParameterProfile, Provider};

/// A hosted foundation model and what can be sent to it
///
/// Parameters are derived from the provider (and for Mistral, the model id)
/// when the entity is built and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundationModel {
    provider: Provider,
    model_id: String,
    features: FeatureSet,
    profile: ParameterProfile,
    parameters: InferenceParameters,
}

impl FoundationModel {
    pub fn new(provider: Provider, model_id: impl Into<String>, features: FeatureSet) -> Self {
        let model_id = model_id.into();
        let profile = ParameterProfile::derive(&provider, &model_id);

        Self {
            provider,
            model_id,
            features,
            profile,
            parameters: profile.parameters(),
        }
    }

    /// Entry for an id missing from the catalog.
    ///
    /// The provider is read from the id prefix and no features are enabled.
    pub fn generic(model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        let provider = Provider::from_model_id(&model_id);
        Self::new(provider, model_id, FeatureSet::none())
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn profile(&self) -> ParameterProfile {
        self.profile
    }

    pub fn parameters(&self) -> &InferenceParameters {
        &self.parameters
    }

    pub fn parameter(&self, kind: ParameterKind) -> &InferenceParameter {
        self.parameters.get(kind)
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.features.supports(feature)
    }

    /// Unknown feature names are reported as unsupported
    pub fn is_feature_supported(&self, feature_name: &str) -> bool {
        self.features.supports_name(feature_name)
    }

    /// Build the provider-specific inference block for a completion request.
    ///
    /// Unsupported parameters are dropped, everything else is clamped into
    /// range and keyed by its wire name.
    pub fn inference_config(&self, settings: &InferenceSettings) -> Map<String, Value> {
        let mut config = Map::new();

        for (kind, parameter) in self.parameters.iter() {
            let Some(requested) = settings.get(kind) else {
                continue;
            };

            let Some(value) = parameter.clamp(requested) else {
                continue;
            };

            config.insert(parameter.name().to_string(), wire_value(kind, value));
        }

        config
    }
}

fn wire_value(kind: ParameterKind, value: f64) -> Value {
    if kind.is_integral() {
        return Value::from(value.round() as i64);
    }

    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claude() -> FoundationModel {
        FoundationModel::new(
            Provider::Anthropic,
            "anthropic.claude-3-haiku-20240307-v1:0",
            FeatureSet::of(&Feature::ALL),
        )
    }

    #[test]
    fn test_parameters_follow_provider() {
        let model = FoundationModel::new(
            Provider::Meta,
            "meta.llama3-8b-instruct-v1:0",
            FeatureSet::none(),
        );

        assert_eq!(model.profile(), ParameterProfile::Meta);
        assert_eq!(model.parameter(ParameterKind::MaxTokensToSample).name(), "max_gen_len");
        assert!(!model.parameter(ParameterKind::TopK).is_supported());
    }

    #[test]
    fn test_is_feature_supported_by_name() {
        let model = claude();

        assert!(model.is_feature_supported("vision"));
        assert!(!model.is_feature_supported("image_generation"));
    }

    #[test]
    fn test_generic_entry_has_no_features() {
        let model = FoundationModel::generic("cohere.command-r7b-v1:0");

        assert_eq!(model.provider(), &Provider::Cohere);
        assert_eq!(model.profile(), ParameterProfile::Cohere);
        assert!(Feature::ALL.iter().all(|f| !model.supports(*f)));
    }

    #[test]
    fn test_inference_config_clamps_and_renames() {
        let settings = InferenceSettings::new()
            .with_max_tokens(10_000.0)
            .with_temperature(0.4)
            .with_top_k(12.6);

        let config = claude().inference_config(&settings);

        assert_eq!(
            Value::Object(config),
            json!({
                "max_tokens_to_sample": 4096,
                "temperature": 0.4,
                "top_k": 13,
            })
        );
    }

    #[test]
    fn test_inference_config_omits_unsupported() {
        let model = FoundationModel::new(
            Provider::Mistral,
            "mistral.mistral-large-2402-v1:0",
            FeatureSet::none(),
        );
        let settings = InferenceSettings::new().with_top_k(10.0).with_top_p(0.5);

        let config = model.inference_config(&settings);

        assert_eq!(Value::Object(config), json!({ "top_p": 0.5 }));
    }

    #[test]
    fn test_inference_config_empty_settings() {
        assert!(claude().inference_config(&InferenceSettings::new()).is_empty());
    }
}
