//! Persisted local identity.
//!
//! A client remembers one player name under [`IDENTITY_KEY`] between runs.
//! It is written on sign-in, cleared on player switch, and read once when a
//! session is restored.

use std::path::PathBuf;

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::Result;
use crate::ledger::Identity;

/// Key the player name is stored under.
pub const IDENTITY_KEY: &str = "dicePlayer";

/// Client-side storage for the remembered player name.
pub trait IdentityStore: Send + Sync {
    /// The remembered identity, if any.
    fn load(&self) -> Result<Option<Identity>>;

    /// Remember `identity`, replacing any previous one.
    fn save(&self, identity: &Identity) -> Result<()>;

    /// Forget the remembered identity.
    fn clear(&self) -> Result<()>;
}

/// Identity kept only for the life of the process.
#[derive(Default)]
pub struct MemoryIdentityStore {
    value: Mutex<Option<Identity>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `identity` already remembered.
    pub fn remembering(identity: Identity) -> Self {
        Self {
            value: Mutex::new(Some(identity)),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<Identity>> {
        Ok(self.value.lock().clone())
    }

    fn save(&self, identity: &Identity) -> Result<()> {
        *self.value.lock() = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.value.lock() = None;
        Ok(())
    }
}

/// Identity kept in a small JSON key/value file.
///
/// Keys other than [`IDENTITY_KEY`] are preserved on write.
#[derive(Clone, Debug)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(map)?)?;
        Ok(())
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<Identity>> {
        let map = self.read_map()?;
        let Some(value) = map.get(IDENTITY_KEY) else {
            return Ok(None);
        };
        match value.as_str().map(Identity::parse) {
            Some(Ok(identity)) => Ok(Some(identity)),
            _ => {
                warn!(path = %self.path.display(), "ignoring unusable stored player name");
                Ok(None)
            }
        }
    }

    fn save(&self, identity: &Identity) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(IDENTITY_KEY.to_string(), Value::String(identity.to_string()));
        self.write_map(&map)
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(IDENTITY_KEY).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
