pub mod types;

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{QuoterError, Result};
use types::{Episode, EpisodeMetadata};

const METADATA_EXT: &str = "json";
const TRANSCRIPT_EXT: &str = "txt";

/// Directory of `<name>.json` / `<name>.txt` pairs produced by the
/// transcription job. Read-only from here.
pub struct EpisodeStore {
    dir: PathBuf,
}

impl EpisodeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn metadata_path(&self, base_name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", base_name, METADATA_EXT))
    }

    fn transcript_path(&self, base_name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", base_name, TRANSCRIPT_EXT))
    }

    /// Base names of every metadata document, sorted.
    pub async fn base_names(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|source| QuoterError::StoreRead {
                path: self.dir.clone(),
                source,
            })?;

        let mut names = Vec::new();
        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|source| QuoterError::StoreRead {
                    path: self.dir.clone(),
                    source,
                })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == METADATA_EXT) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        // read_dir order is platform dependent; keep seeded picks reproducible.
        names.sort();
        debug!(dir = ?self.dir, count = names.len(), "episode store scanned");
        Ok(names)
    }

    async fn read_metadata(&self, path: &Path) -> Result<EpisodeMetadata> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| QuoterError::StoreRead {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| QuoterError::InvalidMetadata {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load one episode, metadata plus full transcript.
    pub async fn load(&self, base_name: &str) -> Result<Episode> {
        let metadata_path = self.metadata_path(base_name);
        if !exists(&metadata_path).await? {
            return Err(QuoterError::EpisodeNotFound {
                name: base_name.to_string(),
            });
        }

        let transcript_path = self.transcript_path(base_name);
        if !exists(&transcript_path).await? {
            return Err(QuoterError::MissingCompanionFile {
                metadata: metadata_path,
                transcript: transcript_path,
            });
        }

        let metadata = self.read_metadata(&metadata_path).await?;
        let transcription = tokio::fs::read_to_string(&transcript_path)
            .await
            .map_err(|source| QuoterError::StoreRead {
                path: transcript_path.clone(),
                source,
            })?;

        Ok(Episode {
            base_name: base_name.to_string(),
            metadata,
            transcription,
        })
    }

    /// All episode metadata, newest first. Undated episodes go last.
    pub async fn list(&self) -> Result<Vec<EpisodeMetadata>> {
        let mut episodes = Vec::new();
        for name in self.base_names().await? {
            episodes.push(self.read_metadata(&self.metadata_path(&name)).await?);
        }

        episodes.sort_by(|a, b| match (a.published_at(), b.published_at()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(episodes)
    }
}

/// `Ok(false)` only when the file is really absent; other I/O failures surface.
async fn exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|source| QuoterError::StoreRead {
            path: path.to_path_buf(),
            source,
        })
}

/// Uniform pick over the store's base names.
pub fn choose_base_name<'a, R: Rng + ?Sized>(
    names: &'a [String],
    rng: &mut R,
) -> Option<&'a str> {
    names.choose(rng).map(String::as_str)
}

/// Pick one episode uniformly at random and load it in full.
pub async fn select_random_episode<R: Rng + ?Sized>(
    store: &EpisodeStore,
    rng: &mut R,
) -> Result<Episode> {
    let names = store.base_names().await?;
    let Some(name) = choose_base_name(&names, rng) else {
        warn!(dir = ?store.dir(), "episode store is empty");
        return Err(QuoterError::EmptyStore {
            dir: store.dir().to_path_buf(),
        });
    };
    debug!(episode = name, of = names.len(), "episode chosen");
    store.load(name).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    use super::*;

    fn write_episode(
        dir: &Path,
        name: &str,
        title: &str,
        pub_date: &str,
        transcript: Option<&str>,
    ) {
        let meta = serde_json::json!({
            "title": title,
            "pubDate": pub_date,
            "audioUrl": format!("https://cdn.example/{}.mp3", name),
            "transcribedAt": "2025-12-13T10:00:00",
            "episodeArt": format!("public/art/{}.jpg", name),
        });
        std::fs::write(dir.join(format!("{}.json", name)), meta.to_string()).unwrap();
        if let Some(text) = transcript {
            std::fs::write(dir.join(format!("{}.txt", name)), text).unwrap();
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = EpisodeStore::new(tmp.path());
        let mut rng = StdRng::seed_from_u64(7);

        let err = select_random_episode(&store, &mut rng).await.unwrap_err();
        assert!(matches!(err, QuoterError::EmptyStore { .. }));
    }

    #[tokio::test]
    async fn test_store_ignores_transcripts_without_metadata() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("orphan.txt"), "words").unwrap();
        let store = EpisodeStore::new(tmp.path());
        let mut rng = StdRng::seed_from_u64(7);

        let err = select_random_episode(&store, &mut rng).await.unwrap_err();
        assert!(matches!(err, QuoterError::EmptyStore { .. }));
    }

    #[tokio::test]
    async fn test_missing_transcript() {
        let tmp = TempDir::new().unwrap();
        write_episode(tmp.path(), "ep1", "Ep1", "", None);
        let store = EpisodeStore::new(tmp.path());
        let mut rng = StdRng::seed_from_u64(7);

        let err = select_random_episode(&store, &mut rng).await.unwrap_err();
        match err {
            QuoterError::MissingCompanionFile { transcript, .. } => {
                assert_eq!(transcript, tmp.path().join("ep1.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_selected_episode_exists_in_store() {
        let tmp = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            write_episode(tmp.path(), name, name, "", Some("transcript body"));
        }
        let store = EpisodeStore::new(tmp.path());
        let names = store.base_names().await.unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let episode = select_random_episode(&store, &mut rng).await.unwrap();
            assert!(names.contains(&episode.base_name));
            assert_eq!(episode.transcription, "transcript body");
            assert_eq!(episode.title(), episode.base_name);
        }
    }

    #[test]
    fn test_selection_is_uniform() {
        let names: Vec<String> = (0..4).map(|i| format!("ep{}", i)).collect();
        let mut rng = StdRng::seed_from_u64(1234);
        let mut counts: HashMap<&str, usize> = HashMap::new();

        let draws = 40_000;
        for _ in 0..draws {
            let name = choose_base_name(&names, &mut rng).unwrap();
            *counts.entry(name).or_default() += 1;
        }

        assert_eq!(counts.len(), names.len());
        let expected = draws / names.len();
        for (name, count) in counts {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 20,
                "{} drawn {} times, expected about {}",
                name,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_choose_from_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(choose_base_name(&[], &mut rng).is_none());
    }

    #[tokio::test]
    async fn test_load_unknown_episode() {
        let tmp = TempDir::new().unwrap();
        let store = EpisodeStore::new(tmp.path());
        let err = store.load("nope").await.unwrap_err();
        assert!(matches!(err, QuoterError::EpisodeNotFound { name } if name == "nope"));
    }

    #[tokio::test]
    async fn test_unreadable_store_is_not_a_missing_episode() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the store directory should be: lookups inside
        // it fail with ENOTDIR rather than "not found".
        let not_a_dir = tmp.path().join("transcripts");
        std::fs::write(&not_a_dir, "oops").unwrap();
        let store = EpisodeStore::new(&not_a_dir);

        let err = store.load("e").await.unwrap_err();
        match err {
            QuoterError::StoreRead { path, .. } => {
                assert_eq!(path, not_a_dir.join("e.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_metadata() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bad.json"), "{ not json").unwrap();
        std::fs::write(tmp.path().join("bad.txt"), "words").unwrap();
        let store = EpisodeStore::new(tmp.path());

        let err = store.load("bad").await.unwrap_err();
        assert!(matches!(err, QuoterError::InvalidMetadata { .. }));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let tmp = TempDir::new().unwrap();
        write_episode(tmp.path(), "old", "Old", "Mon, 01 Jan 2024 08:00:00 GMT", Some("x"));
        write_episode(tmp.path(), "undated", "Undated", "", Some("x"));
        write_episode(tmp.path(), "new", "New", "Fri, 12 Dec 2025 08:00:00 GMT", Some("x"));
        write_episode(tmp.path(), "mid", "Mid", "2025-03-01T00:00:00Z", None);

        let store = EpisodeStore::new(tmp.path());
        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();

        assert_eq!(titles, vec!["New", "Mid", "Old", "Undated"]);
    }
}
