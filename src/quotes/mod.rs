pub mod mock;
pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::episodes::types::Episode;
use crate::error::{QuoterError, Result};
use crate::llm::{ChatModel, Message};

/// Synopsis and quotes the model produced for one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeQuotes {
    pub synopsis: String,
    pub quotes: Vec<String>,
}

/// Ask the model for a synopsis and quotes for `episode`.
///
/// Exactly one request is made. The answer is returned as parsed: quote
/// count and wording are not checked, and provider errors are passed on
/// without retrying.
pub async fn extract_quotes<M: ChatModel + ?Sized>(
    model: &M,
    episode: &Episode,
) -> Result<EpisodeQuotes> {
    info!(
        title = %episode.title(),
        transcript_chars = episode.transcription.chars().count(),
        "extracting quotes"
    );

    let messages = [
        Message::system(prompts::SYSTEM_PROMPT),
        Message::user(prompts::quote_prompt(
            episode.title(),
            &episode.transcription,
        )),
    ];

    let content = model
        .complete_json(&messages)
        .await?
        .filter(|c| !c.trim().is_empty())
        .ok_or(QuoterError::EmptyResponse)?;
    debug!(chars = content.len(), "model answered");

    parse_quotes(&content)
}

/// Parse the model's JSON answer.
pub fn parse_quotes(content: &str) -> Result<EpisodeQuotes> {
    serde_json::from_str(content).map_err(|source| QuoterError::MalformedResponse { source })
}
