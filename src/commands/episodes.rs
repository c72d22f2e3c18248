use crate::config::QuoterConfig;
use crate::episodes::EpisodeStore;

/// List every episode's metadata, newest first
pub async fn episodes(config: &QuoterConfig) -> anyhow::Result<()> {
    let store = EpisodeStore::new(&config.transcripts_dir);
    let episodes = store.list().await?;

    let body = serde_json::json!({ "episodes": episodes });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
