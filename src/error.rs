use std::path::PathBuf;

/// Everything that can stop a quote run.
///
/// Store integrity, extraction and persistence failures each get their own
/// variant so callers (and tests) can tell them apart. Transport errors from
/// the model provider are carried through untouched in `Provider`.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum QuoterError {
    #[display("no episodes found in {}", dir.display())]
    EmptyStore {
        #[error(not(source))]
        dir: PathBuf,
    },

    #[display(
        "episode metadata {} has no transcript at {}",
        metadata.display(),
        transcript.display()
    )]
    MissingCompanionFile {
        #[error(not(source))]
        metadata: PathBuf,
        #[error(not(source))]
        transcript: PathBuf,
    },

    #[display("failed to read episode store at {}: {}", path.display(), source)]
    StoreRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("invalid episode metadata in {}: {}", path.display(), source)]
    InvalidMetadata {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[display("no episode named {name:?} in the store")]
    EpisodeNotFound {
        #[error(not(source))]
        name: String,
    },

    #[display("model returned no content")]
    EmptyResponse,

    #[display("model response is not a synopsis/quotes document: {source}")]
    MalformedResponse { source: serde_json::Error },

    #[display("model provider error: {source}")]
    Provider { source: reqwest::Error },

    #[display("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[display("refusing to write an artifact with no quotes")]
    NoQuotes,

    #[display("refusing to write an artifact with an empty synopsis")]
    NoSynopsis,

    #[display("failed to write {}: {}", path.display(), source)]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("failed to read {}: {}", path.display(), source)]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("corrupt quote document at {}: {}", path.display(), source)]
    CorruptArtifact {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for QuoterError {
    fn from(source: reqwest::Error) -> Self {
        QuoterError::Provider { source }
    }
}

pub type Result<T, E = QuoterError> = std::result::Result<T, E>;
