//! CLI module for Bedrock Playground
//!
//! Provides subcommands for:
//! - `serve`: HTTP API server
//! - `models`: inspect the model catalog
//! - `conversation`: sign and verify exported transcripts

pub mod conversation;
pub mod models;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging::{self, LogTarget};

/// Bedrock Playground - model catalog and signed conversation exports
#[derive(Parser)]
#[command(name = "bedrock-playground")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Inspect the foundation model catalog
    Models(models::ModelsArgs),

    /// Sign or verify conversation export files
    Conversation(conversation::ConversationArgs),
}

/// Load configuration for one-shot commands, logging to stderr so stdout
/// stays machine readable
fn load_tool_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging, LogTarget::Stderr);

    Ok(config)
}
