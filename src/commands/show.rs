use crate::artifact::read_daily_artifact;
use crate::config::QuoterConfig;

/// Print the current daily quote document
pub async fn show(config: &QuoterConfig) -> anyhow::Result<()> {
    match read_daily_artifact(&config.output_path).await? {
        Some(artifact) => println!("{}", serde_json::to_string_pretty(&artifact)?),
        None => println!("No quote available yet"),
    }
    Ok(())
}
