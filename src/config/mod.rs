//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, ConversationConfig, LogFormat, LoggingConfig, SecurityConfig, ServerConfig,
};
