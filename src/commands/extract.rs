use anyhow::Context;
use tracing::{info, warn};

use crate::config::QuoterConfig;
use crate::episodes::EpisodeStore;
use crate::error::QuoterError;
use crate::llm::LlmClient;
use crate::quotes::extract_quotes;

/// Try quote extraction on one episode without touching the daily document
pub async fn extract(config: &QuoterConfig, name: &str) -> anyhow::Result<()> {
    let store = EpisodeStore::new(&config.transcripts_dir);

    let episode = match store.load(name).await {
        Ok(episode) => episode,
        Err(e @ QuoterError::EpisodeNotFound { .. }) => {
            let available = store.base_names().await.unwrap_or_default();
            warn!(available = ?available, "unknown episode");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let client = LlmClient::new(&config.llm)?;
    info!(model = client.model(), title = %episode.title(), "extracting");

    let result = extract_quotes(&client, &episode)
        .await
        .with_context(|| format!("quote extraction failed for {}", episode.title()))?;

    println!("=== SYNOPSIS ===");
    println!("{}", result.synopsis);
    println!("\n=== QUOTES ===");
    for (i, quote) in result.quotes.iter().enumerate() {
        println!("{}. \"{}\"", i + 1, quote);
    }

    Ok(())
}
