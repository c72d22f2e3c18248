use anyhow::Context;
use tracing::info;

use crate::config::QuoterConfig;
use crate::episodes::EpisodeStore;
use crate::llm::{ChatModel, LlmClient};
use crate::pipeline::QuotePipeline;
use crate::quotes::mock::CannedModel;

/// Generate today's quote document
pub async fn run(config: &QuoterConfig, mock: bool) -> anyhow::Result<()> {
    let store = EpisodeStore::new(&config.transcripts_dir);

    let model: Box<dyn ChatModel> = if mock {
        info!("using canned model answer, no API call");
        Box::new(CannedModel)
    } else {
        let client = LlmClient::new(&config.llm)?;
        info!(model = client.model(), "LLM client initialized");
        Box::new(client)
    };

    let pipeline = QuotePipeline::new(
        &store,
        model.as_ref(),
        &config.output_path,
        &config.public_dir_prefix,
    );
    pipeline
        .run(&mut rand::thread_rng())
        .await
        .context("daily quote run failed")?;

    Ok(())
}
