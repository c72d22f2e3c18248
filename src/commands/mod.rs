mod episodes;
mod extract;
mod run;
mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::QuoterConfig;

/// Daily quote generator for the podcast site
#[derive(Debug, Parser)]
#[command(name = "daily-quoter", version)]
pub struct Cli {
    /// Episode store directory (overrides TRANSCRIPTS_DIR)
    #[arg(long, global = true)]
    pub transcripts_dir: Option<PathBuf>,

    /// Daily quote document path (overrides QUOTE_PATH)
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick a random episode, extract quotes, write the daily document
    Run {
        /// Use a canned model answer instead of calling the API
        #[arg(long)]
        mock: bool,
    },
    /// Extract quotes for one named episode and print them
    Extract {
        /// Base name shared by the episode's .json and .txt files
        name: String,
    },
    /// Print every episode's metadata as JSON, newest first
    Episodes,
    /// Print the current daily quote document
    Show,
}

impl Cli {
    pub fn apply(&self, config: &mut QuoterConfig) {
        if let Some(dir) = &self.transcripts_dir {
            config.transcripts_dir = dir.clone();
        }
        if let Some(path) = &self.output {
            config.output_path = path.clone();
        }
    }
}

pub async fn dispatch(command: Command, config: &QuoterConfig) -> anyhow::Result<()> {
    match command {
        Command::Run { mock } => run::run(config, mock).await,
        Command::Extract { name } => extract::extract(config, &name).await,
        Command::Episodes => episodes::episodes(config).await,
        Command::Show => show::show(config).await,
    }
}
