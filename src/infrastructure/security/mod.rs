//! Conversation signing and verification

mod algorithm;
mod canonical;
mod envelope;

pub use algorithm::HashAlgorithm;
pub use canonical::to_canonical_json_seq;
pub use envelope::{ConversationEnvelope, Verification, VerificationFailure};
