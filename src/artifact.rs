use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::episodes::types::Episode;
use crate::error::{QuoterError, Result};
use crate::quotes::EpisodeQuotes;

/// Public-facing episode fields embedded in the daily document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub title: String,
    pub pub_date: String,
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_podcasts_url: Option<String>,
    /// Already resolved to a site-absolute URL path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_art: Option<String>,
}

/// The one document the website reads: today's episode, synopsis and quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyArtifact {
    pub episode: EpisodeSummary,
    pub synopsis: String,
    pub quotes: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub selected_quote_index: usize,
}

impl DailyArtifact {
    /// Assemble the document. The transcript is dropped; art paths under
    /// `public_prefix` are rewritten to `/`-rooted URLs.
    pub fn new(
        episode: &Episode,
        quotes: &EpisodeQuotes,
        public_prefix: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        if quotes.synopsis.trim().is_empty() {
            return Err(QuoterError::NoSynopsis);
        }
        if quotes.quotes.is_empty() {
            return Err(QuoterError::NoQuotes);
        }

        let meta = &episode.metadata;
        Ok(Self {
            episode: EpisodeSummary {
                title: meta.title.clone(),
                pub_date: meta.pub_date.clone(),
                audio_url: meta.audio_url.clone(),
                spotify_url: meta.spotify_url.clone(),
                apple_podcasts_url: meta.apple_podcasts_url.clone(),
                episode_art: meta
                    .episode_art
                    .as_deref()
                    .map(|art| public_art_path(art, public_prefix)),
            },
            synopsis: quotes.synopsis.clone(),
            quotes: quotes.quotes.clone(),
            generated_at,
            selected_quote_index: 0,
        })
    }

    pub fn selected_quote(&self) -> Option<&str> {
        self.quotes
            .get(self.selected_quote_index)
            .map(String::as_str)
    }
}

/// `public/art/ep.jpg` -> `/art/ep.jpg`. Other paths are returned unchanged.
pub fn public_art_path(art: &str, public_prefix: &str) -> String {
    match art.strip_prefix(public_prefix) {
        Some(rest) if !public_prefix.is_empty() => format!("/{}", rest.trim_start_matches('/')),
        _ => art.to_string(),
    }
}

/// Build today's document and write it to `path`, replacing whatever was
/// there. The parent directory is created if needed.
pub async fn write_daily_artifact(
    path: &Path,
    episode: &Episode,
    quotes: &EpisodeQuotes,
    public_prefix: &str,
) -> Result<DailyArtifact> {
    let generated_at = Utc::now().trunc_subsecs(3);
    let artifact = DailyArtifact::new(episode, quotes, public_prefix, generated_at)?;

    let persistence = |source: std::io::Error| QuoterError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(persistence)?;
    }

    let body = serde_json::to_string_pretty(&artifact)
        .map_err(|e| persistence(std::io::Error::from(e)))?;
    tokio::fs::write(path, body).await.map_err(persistence)?;

    info!(path = ?path, title = %artifact.episode.title, "daily quote written");
    Ok(artifact)
}

/// Read the current document. `Ok(None)` when none has been written yet.
pub async fn read_daily_artifact(path: &Path) -> Result<Option<DailyArtifact>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = ?path, "no daily quote yet");
            return Ok(None);
        }
        Err(source) => {
            return Err(QuoterError::ArtifactRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| QuoterError::CorruptArtifact {
            path: path.to_path_buf(),
            source,
        })
}
