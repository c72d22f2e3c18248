use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Metadata document written next to each transcript by the transcription job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeMetadata {
    pub title: String,
    /// Kept as the feed supplied it, usually RFC 2822.
    #[serde(default)]
    pub pub_date: String,
    pub audio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_podcasts_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcribed_at: Option<String>,
    /// Path relative to the site root, e.g. `public/art/ep-12.jpg`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_art: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<String>,
}

impl EpisodeMetadata {
    /// Parse `pub_date` as RFC 2822 (feed format) or RFC 3339.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.pub_date.trim();
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
    }
}

/// One transcribed episode with its full transcript loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// File stem shared by the `.json` and `.txt` pair.
    pub base_name: String,
    pub metadata: EpisodeMetadata,
    pub transcription: String,
}

impl Episode {
    pub fn title(&self) -> &str {
        &self.metadata.title
    }
}
