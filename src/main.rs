use bedrock_playground::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Models(args) => cli::models::run(args),
        Command::Conversation(args) => cli::conversation::run(args),
    }
}
