use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Runtime settings for a quote run, read from the environment.
#[derive(Debug, Clone)]
pub struct QuoterConfig {
    pub transcripts_dir: PathBuf,
    pub output_path: PathBuf,
    /// Leading path segment that the web server maps to `/`.
    pub public_dir_prefix: String,
    pub llm: LlmSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub api_key: Option<String>,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.5,
            api_key: None,
            timeout: None,
        }
    }
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            transcripts_dir: PathBuf::from("./transcripts"),
            output_path: PathBuf::from("./data/current-quote.json"),
            public_dir_prefix: "public/".to_string(),
            llm: LlmSettings::default(),
        }
    }
}

impl QuoterConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let transcripts_dir = dotenv::var("TRANSCRIPTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.transcripts_dir);
        let output_path = dotenv::var("QUOTE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);
        let public_dir_prefix =
            dotenv::var("PUBLIC_DIR_PREFIX").unwrap_or(defaults.public_dir_prefix);

        let base_url = dotenv::var("LLM_BASE_URL").unwrap_or(defaults.llm.base_url);
        let model = dotenv::var("LLM_MODEL").unwrap_or(defaults.llm.model);
        let api_key = dotenv::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());

        let temperature = match dotenv::var("LLM_TEMPERATURE") {
            Ok(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("LLM_TEMPERATURE is not a number: {raw:?}"))?,
            Err(_) => defaults.llm.temperature,
        };
        let timeout = match dotenv::var("LLM_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse::<u64>().with_context(
                || format!("LLM_TIMEOUT_SECS is not a whole number of seconds: {raw:?}"),
            )?)),
            Err(_) => None,
        };

        Ok(Self {
            transcripts_dir,
            output_path,
            public_dir_prefix,
            llm: LlmSettings {
                base_url,
                model,
                temperature,
                api_key,
                timeout,
            },
        })
    }

    /// Reject an output path that the episode store would scan as an episode.
    pub fn validate(&self) -> Result<()> {
        let is_metadata = self
            .output_path
            .extension()
            .is_some_and(|ext| ext == "json");
        let parent = self.output_path.parent().unwrap_or(Path::new(""));
        if is_metadata && resolve_dir(parent) == resolve_dir(&self.transcripts_dir) {
            bail!(
                "QUOTE_PATH {} is inside TRANSCRIPTS_DIR {}; it would be read as an episode",
                self.output_path.display(),
                self.transcripts_dir.display()
            );
        }
        Ok(())
    }
}

/// Canonical form when the directory exists, lexically cleaned otherwise.
fn resolve_dir(dir: &Path) -> PathBuf {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    dir.canonicalize().unwrap_or_else(|_| dir.components().collect())
}
