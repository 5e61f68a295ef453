//! Conversation command - offline signing and verification of export files

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use serde_json::Value;
use tracing::info;

use crate::domain::{validate_conversation_structure, ImportError, SecureConversationPackage};
use crate::infrastructure::conversation::ConversationImporter;
use crate::infrastructure::security::ConversationEnvelope;

#[derive(Args)]
pub struct ConversationArgs {
    #[command(subcommand)]
    pub command: ConversationCommand,
}

#[derive(Subcommand)]
pub enum ConversationCommand {
    /// Wrap a JSON array of messages into a signed package
    Sign {
        /// Transcript file containing a JSON array of messages
        transcript: PathBuf,

        /// Write the package here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the signature and structure of a package
    Verify {
        /// Package file produced by export or `sign`
        package: PathBuf,
    },
}

pub fn run(args: ConversationArgs) -> anyhow::Result<()> {
    let config = super::load_tool_config()?;
    let envelope = Arc::new(ConversationEnvelope::from_config(&config.security)?);
    let importer = ConversationImporter::new(envelope, config.conversation.max_messages);

    match args.command {
        ConversationCommand::Sign { transcript, output } => {
            let bytes = fs::read(&transcript)?;
            let package = sign(&importer, &bytes)?;
            let rendered = serde_json::to_string_pretty(&package)?;

            match output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    info!(
                        path = %path.display(),
                        message_count = package.message_count(),
                        "Wrote signed conversation"
                    );
                }
                None => println!("{}", rendered),
            }
        }
        ConversationCommand::Verify { package } => {
            let bytes = fs::read(&package)?;
            let messages = importer.inspect(&bytes)?;
            println!(
                "{}: verified, {} message(s)",
                package.display(),
                messages.len()
            );
        }
    }

    Ok(())
}

/// Validate a raw transcript and sign it
fn sign(
    importer: &ConversationImporter,
    bytes: &[u8],
) -> Result<SecureConversationPackage, ImportError> {
    let transcript: Value = serde_json::from_slice(bytes)?;
    validate_conversation_structure(&transcript, importer.max_messages())?;

    let messages = transcript.as_array().map(Vec::as_slice).unwrap_or_default();
    Ok(importer.envelope().secure_conversation(messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StructuralError;
    use crate::infrastructure::security::HashAlgorithm;

    fn importer() -> ConversationImporter {
        let envelope = ConversationEnvelope::new("secret", "salt", HashAlgorithm::Sha256).unwrap();
        ConversationImporter::new(Arc::new(envelope), 3)
    }

    #[test]
    fn test_signed_transcript_verifies() {
        let importer = importer();
        let transcript = br#"[{"role": "user", "content": [{"text": "hi"}]}]"#;

        let package = sign(&importer, transcript).unwrap();
        let bytes = serde_json::to_vec(&package).unwrap();

        assert_eq!(importer.inspect(&bytes).unwrap().len(), 1);
    }

    #[test]
    fn test_sign_rejects_invalid_transcripts() {
        let importer = importer();

        assert!(matches!(
            sign(&importer, b"[{"),
            Err(ImportError::Parse(_))
        ));
        assert!(matches!(
            sign(&importer, br#"{"role": "user"}"#),
            Err(ImportError::Structure(StructuralError::InvalidFormat))
        ));
        assert!(matches!(
            sign(&importer, br#"[{"role": "user", "content": "hi"}]"#),
            Err(ImportError::Structure(StructuralError::InvalidContent { index: 0 }))
        ));
    }
}
