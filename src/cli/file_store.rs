use n_in_a_row::persist::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local storage for the terminal: one JSON object of strings, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// A missing or empty file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "opened save file");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use n_in_a_row::core::{game_session::GameSession, player::Scoreboard, settings::GameSettings};
    use n_in_a_row::persist::snapshot::Snapshot;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).unwrap();

        assert!(!store.contains("cells"));
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("boardSize", "7").unwrap();
        store.set("XWins", "2").unwrap();
        store.remove("XWins").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("boardSize").as_deref(), Some("7"));
        assert_eq!(reopened.get("XWins"), None);
    }

    #[test]
    fn snapshot_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let session = GameSession::at_start(GameSettings::new(5, 4).unwrap(), Scoreboard::new(1, 3));

        let mut store = FileStore::open(&path).unwrap();
        Snapshot::from_session(&session).save(&mut store).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        let restored = Snapshot::load(&reopened).unwrap().unwrap();
        assert_eq!(restored, Snapshot::from_session(&session));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(FileStore::open(&path), Err(StoreError::Json(_))));
    }
}
