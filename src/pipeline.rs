use std::path::PathBuf;

use rand::Rng;
use tracing::{error, info};

use crate::artifact::{write_daily_artifact, DailyArtifact};
use crate::episodes::{select_random_episode, EpisodeStore};
use crate::error::Result;
use crate::llm::ChatModel;
use crate::quotes::extract_quotes;

/// Select -> extract -> write, once.
pub struct QuotePipeline<'a, M: ChatModel + ?Sized> {
    store: &'a EpisodeStore,
    model: &'a M,
    output_path: PathBuf,
    public_prefix: String,
}

impl<'a, M: ChatModel + ?Sized> QuotePipeline<'a, M> {
    pub fn new(
        store: &'a EpisodeStore,
        model: &'a M,
        output_path: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            model,
            output_path: output_path.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Run one pass. Any failure aborts before the artifact is touched,
    /// except a failure of the write itself.
    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DailyArtifact> {
        info!(dir = ?self.store.dir(), "picking random episode");
        let episode = select_random_episode(self.store, rng)
            .await
            .inspect_err(|e| error!(stage = "select", error = %e, "quote run failed"))?;
        info!(
            title = %episode.title(),
            published = %episode.metadata.pub_date,
            "episode selected"
        );

        let quotes = extract_quotes(self.model, &episode)
            .await
            .inspect_err(|e| {
                error!(stage = "extract", title = %episode.title(), error = %e, "quote run failed")
            })?;
        info!(quotes = quotes.quotes.len(), "quotes extracted");

        let artifact = write_daily_artifact(
            &self.output_path,
            &episode,
            &quotes,
            &self.public_prefix,
        )
        .await
        .inspect_err(|e| {
            error!(stage = "write", title = %episode.title(), error = %e, "quote run failed")
        })?;

        info!(
            title = %artifact.episode.title,
            art = ?artifact.episode.episode_art,
            synopsis = %artifact.synopsis,
            quote = ?artifact.selected_quote(),
            path = ?self.output_path,
            "daily quote generated"
        );
        Ok(artifact)
    }
}
