//! API request and response types

pub mod conversation;
pub mod error;
pub mod models;

pub use conversation::{ConversationResponse, VerifyResponse};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use models::{ModelDetail, ModelSummary, ModelsResponse, ParameterInfo};
