mod artifact;
mod commands;
mod config;
mod episodes;
mod error;
mod llm;
mod pipeline;
mod quotes;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{Cli, Command};
use config::QuoterConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load env
    let _ = dotenv::dotenv();
    let cli = Cli::parse();

    let mut config = QuoterConfig::from_env()?;
    cli.apply(&mut config);
    config.validate()?;
    info!(
        transcripts = ?config.transcripts_dir,
        output = ?config.output_path,
        "configuration loaded"
    );

    let command = cli.command.unwrap_or(Command::Run { mock: false });
    commands::dispatch(command, &config).await
}
