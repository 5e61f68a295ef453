use thiserror::Error;

use super::validation::StructuralError;
use crate::domain::DomainError;

/// Reasons an uploaded conversation is rejected
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid conversation file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "Integrity check failed: the conversation was modified or was not exported by this application"
    )]
    Integrity,

    #[error(transparent)]
    Structure(#[from] StructuralError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
