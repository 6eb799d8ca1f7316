//! Leaderboard kept in a directory of JSON files.
//!
//! Layout: `<dir>/<collection>/<hex(name)>.json`, one `{name, wins, losses}`
//! object per identity. Each identity owns its own file, so writers for
//! different identities never touch the same bytes.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::store::LeaderboardStore;
use crate::error::{DiceError, Result};
use crate::ledger::{Identity, LeaderboardSnapshot, PlayerRecord};

/// Leaderboard stored as one JSON file per identity under a directory.
///
/// Any number of processes may point at the same directory. A submit
/// replaces only its own identity's file through a uniquely named temp file
/// and an atomic rename, so the last write for an identity wins and other
/// identities are untouched.
#[derive(Clone, Debug)]
pub struct JsonFileLeaderboard {
    dir: PathBuf,
}

impl JsonFileLeaderboard {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DiceError::InvalidConfig {
                reason: format!("collection name {collection:?} is not a plain file stem"),
            });
        }
        Ok(self.dir.join(collection))
    }

    async fn read_record(path: &Path) -> Result<Option<PlayerRecord>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            // Raced with a rename that replaced it; the next read sees the new file.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable("reading", path, err)),
        }
    }
}

/// File stem for an identity: lowercase hex of its UTF-8 bytes.
fn file_stem(identity: &Identity) -> String {
    identity
        .as_str()
        .bytes()
        .fold(String::with_capacity(identity.as_str().len() * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

fn unavailable(action: &str, path: &Path, err: std::io::Error) -> DiceError {
    DiceError::StoreUnavailable {
        reason: format!("{action} {}", path.display()),
        source: Some(Box::new(err)),
    }
}

fn atomic_write(dir: &Path, path: &Path, data: &[u8]) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| unavailable("creating", dir, e))?;
    let mut temp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| unavailable("creating temp file in", dir, e))?;
    temp.write_all(data)
        .map_err(|e| unavailable("writing temp file in", dir, e))?;
    temp.persist(path)
        .map_err(|e| unavailable("persisting", path, e.error))?;
    Ok(())
}

#[async_trait]
impl LeaderboardStore for JsonFileLeaderboard {
    #[instrument(skip(self, record), fields(identity = %record.identity))]
    async fn submit(&self, collection: &str, record: &PlayerRecord) -> Result<()> {
        let dir = self.collection_dir(collection)?;
        let path = dir.join(format!("{}.json", file_stem(&record.identity)));
        let data = serde_json::to_vec_pretty(record)?;

        tokio::task::spawn_blocking(move || atomic_write(&dir, &path, &data))
            .await
            .map_err(|e| DiceError::StoreUnavailable {
                reason: "leaderboard writer task failed".to_string(),
                source: Some(Box::new(e)),
            })??;

        debug!(wins = record.wins, losses = record.losses, "leaderboard entry written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_all(&self, collection: &str) -> Result<LeaderboardSnapshot> {
        let dir = self.collection_dir(collection)?;
        let mut listing = match tokio::fs::read_dir(&dir).await {
            Ok(listing) => listing,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(LeaderboardSnapshot::new());
            }
            Err(err) => return Err(unavailable("listing", &dir, err)),
        };

        let mut entries = Vec::new();
        while let Some(entry) = listing
            .next_entry()
            .await
            .map_err(|e| unavailable("listing", &dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(record) = Self::read_record(&path).await? {
                entries.push(record);
            }
        }
        entries.sort_by(|a, b| a.identity.as_str().cmp(b.identity.as_str()));
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, wins: u32, losses: u32) -> PlayerRecord {
        PlayerRecord::with_tally(Identity::parse(name).unwrap(), wins, losses)
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLeaderboard::new(dir.path());

        assert!(store.fetch_all("dice_leaderboard").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let first = JsonFileLeaderboard::new(dir.path().join("board"));
        let second = JsonFileLeaderboard::new(dir.path().join("board"));

        first.submit("dice", &record("Alex", 1, 0)).await.unwrap();
        second.submit("dice", &record("Sam", 0, 1)).await.unwrap();
        first.submit("dice", &record("Alex", 2, 0)).await.unwrap();

        let snapshot = second.fetch_all("dice").await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.iter().next(), Some(&record("Alex", 2, 0)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submits_for_distinct_identities_all_land() {
        for _ in 0..10 {
            let dir = tempfile::tempdir().unwrap();
            let writers: Vec<_> = (0..8)
                .map(|i| {
                    let store = JsonFileLeaderboard::new(dir.path());
                    tokio::spawn(async move { store.submit("dice", &record(&format!("p{i}"), i, 0)).await })
                })
                .collect();
            for writer in writers {
                writer.await.unwrap().unwrap();
            }

            let snapshot = JsonFileLeaderboard::new(dir.path()).fetch_all("dice").await.unwrap();
            assert_eq!(snapshot.len(), 8);
            for i in 0..8 {
                let name = Identity::parse(&format!("p{i}")).unwrap();
                assert_eq!(snapshot.find(&name).map(|r| r.wins), Some(i));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submits_for_one_identity_keep_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let writers: Vec<_> = (0..8)
            .map(|i| {
                let store = JsonFileLeaderboard::new(dir.path());
                tokio::spawn(async move { store.submit("dice", &record("Alex", i, 0)).await })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let snapshot = JsonFileLeaderboard::new(dir.path()).fetch_all("dice").await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.iter().next().unwrap().wins < 8);
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path().join("dice")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_wire_format_matches_shared_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLeaderboard::new(dir.path());
        store.submit("dice", &record("Alex", 3, 1)).await.unwrap();

        // "Alex" = 41 6c 65 78
        let raw = std::fs::read_to_string(dir.path().join("dice").join("416c6578.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Alex", "wins": 3, "losses": 1}));
    }

    #[tokio::test]
    async fn test_names_with_path_characters_stay_inside_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLeaderboard::new(dir.path());
        store.submit("dice", &record("../Ünï/côde", 1, 1)).await.unwrap();

        let snapshot = store.fetch_all("dice").await.unwrap();
        assert_eq!(snapshot.iter().next(), Some(&record("../Ünï/côde", 1, 1)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_rejects_path_like_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileLeaderboard::new(dir.path());

        let err = store.fetch_all("../escape").await.unwrap_err();
        assert!(matches!(err, DiceError::InvalidConfig { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dice")).unwrap();
        std::fs::write(dir.path().join("dice").join("416c6578.json"), b"not json").unwrap();
        let store = JsonFileLeaderboard::new(dir.path());

        assert!(matches!(store.fetch_all("dice").await, Err(DiceError::Json(_))));
    }
}
