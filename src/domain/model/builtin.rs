//! Models shipped with the application

use super::entity::FoundationModel;
use super::feature::{Feature, FeatureSet};
use super::provider::Provider;

use Feature::*;

const CLAUDE_3: &[Feature] = &[
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    Vision,
    ToolUse,
    StreamingToolUse,
    Guardrails,
];
const CLAUDE_TEXT: &[Feature] = &[
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    Guardrails,
];
const LLAMA: &[Feature] = &[
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    Guardrails,
];
const LLAMA_3_1: &[Feature] = &[
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    ToolUse,
    Guardrails,
];
const MISTRAL_INSTRUCT: &[Feature] = &[Converse, ConverseStream, DocumentChat, Guardrails];
const MISTRAL_LARGE: &[Feature] = &[
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    ToolUse,
    Guardrails,
];
const COHERE_COMMAND: &[Feature] = &[Converse, ConverseStream, DocumentChat, Guardrails];
const COHERE_COMMAND_R: &[Feature] = &[
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    ToolUse,
    Guardrails,
];
const AI21_JURASSIC: &[Feature] = &[Converse, DocumentChat, Guardrails];
const AI21_JAMBA: &[Feature] = &[
    Converse,
    ConverseStream,
    SystemPrompts,
    DocumentChat,
    Guardrails,
];
const TITAN_TEXT: &[Feature] = &[Converse, ConverseStream, DocumentChat, Guardrails];

const MODELS: &[(&str, &[Feature])] = &[
    ("anthropic.claude-3-5-sonnet-20240620-v1:0", CLAUDE_3),
    ("anthropic.claude-3-opus-20240229-v1:0", CLAUDE_3),
    ("anthropic.claude-3-sonnet-20240229-v1:0", CLAUDE_3),
    ("anthropic.claude-3-haiku-20240307-v1:0", CLAUDE_3),
    ("anthropic.claude-v2:1", CLAUDE_TEXT),
    ("anthropic.claude-v2", CLAUDE_TEXT),
    ("anthropic.claude-instant-v1", CLAUDE_TEXT),
    ("meta.llama2-13b-chat-v1", LLAMA),
    ("meta.llama2-70b-chat-v1", LLAMA),
    ("meta.llama3-8b-instruct-v1:0", LLAMA),
    ("meta.llama3-70b-instruct-v1:0", LLAMA),
    ("meta.llama3-1-8b-instruct-v1:0", LLAMA_3_1),
    ("meta.llama3-1-70b-instruct-v1:0", LLAMA_3_1),
    ("meta.llama3-1-405b-instruct-v1:0", LLAMA_3_1),
    ("mistral.mistral-7b-instruct-v0:2", MISTRAL_INSTRUCT),
    ("mistral.mixtral-8x7b-instruct-v0:1", MISTRAL_INSTRUCT),
    ("mistral.mistral-large-2402-v1:0", MISTRAL_LARGE),
    ("mistral.mistral-small-2402-v1:0", MISTRAL_LARGE),
    ("cohere.command-text-v14", COHERE_COMMAND),
    ("cohere.command-light-text-v14", COHERE_COMMAND),
    ("cohere.command-r-v1:0", COHERE_COMMAND_R),
    ("cohere.command-r-plus-v1:0", COHERE_COMMAND_R),
    ("ai21.j2-mid-v1", AI21_JURASSIC),
    ("ai21.j2-ultra-v1", AI21_JURASSIC),
    ("ai21.jamba-instruct-v1:0", AI21_JAMBA),
    ("amazon.titan-text-express-v1", TITAN_TEXT),
    ("amazon.titan-text-lite-v1", TITAN_TEXT),
    ("amazon.titan-text-premier-v1:0", TITAN_TEXT),
];

pub(super) fn builtin_models() -> Vec<FoundationModel> {
    MODELS
        .iter()
        .map(|(model_id, features)| {
            FoundationModel::new(
                Provider::from_model_id(model_id),
                *model_id,
                FeatureSet::of(features),
            )
        })
        .collect()
}
