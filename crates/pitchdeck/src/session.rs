use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage key for the last viewed slide. Bump the suffix whenever the deck
/// layout changes so stale indices from an older release are ignored.
pub const SLIDE_KEY: &str = "closing.show.slide.v12";
/// Storage key for the notes display flag.
pub const NOTES_KEY: &str = "closing.show.notes.v9";

const FILENAME: &str = "session.yaml";
const APP_DIR: &str = "pitchdeck";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine a data directory for the session store")]
    NoDataDir,
    #[error("failed to access session store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session store {path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A string key-value store, the native stand-in for browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// YAML-backed store. Every write flushes the whole map to disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    /// The file on disk could not be parsed; the next write replaces it.
    stale_file: bool,
}

impl FileStore {
    pub fn default_path() -> Result<PathBuf, StoreError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&Self::default_path()?)
    }

    /// Open the store at `path`. A missing file is an empty store. A corrupt
    /// one is logged and treated as empty; the next write replaces it.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let mut stale_file = false;
        let entries = match std::fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "discarding unreadable session store: {e}");
                    stale_file = true;
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
            stale_file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write the whole map through a temporary file so a crash never leaves
    /// a half-written store behind.
    fn flush(&mut self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(io_err)?;
        let yaml = serde_yaml::to_string(&self.entries).map_err(|source| StoreError::Yaml {
            path: self.path.clone(),
            source,
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(yaml.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        self.stale_file = false;
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
        if self.entries.remove(key).is_some() || self.stale_file {
            self.flush()?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Typed view over the versioned session keys.
///
/// Writes never fail from the caller's point of view: a store that refuses a
/// write is logged and the presentation carries on with in-memory state.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The persisted slide index, if it parses. Range checks belong to the
    /// caller, which knows the deck length.
    pub fn slide_index(&self) -> Option<usize> {
        self.store
            .get(SLIDE_KEY)
            .and_then(|v| v.trim().parse::<usize>().ok())
    }

    pub fn save_slide_index(&mut self, index: usize) {
        if let Err(e) = self.store.set(SLIDE_KEY, &index.to_string()) {
            tracing::warn!(error = %e, "could not persist slide index");
        }
    }

    pub fn notes_visible(&self) -> bool {
        self.store.get(NOTES_KEY).is_some_and(|v| v.trim() == "1")
    }

    pub fn save_notes_visible(&mut self, visible: bool) {
        let value = if visible { "1" } else { "0" };
        if let Err(e) = self.store.set(NOTES_KEY, value) {
            tracing::warn!(error = %e, "could not persist notes flag");
        }
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(SLIDE_KEY)?;
        self.store.remove(NOTES_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::NoDataDir)
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::NoDataDir)
        }
    }

    #[test]
    fn test_slide_index_roundtrip() {
        let mut session = Session::new(MemoryStore::new());
        assert_eq!(session.slide_index(), None);
        session.save_slide_index(4);
        assert_eq!(session.store().get(SLIDE_KEY).as_deref(), Some("4"));
        assert_eq!(session.slide_index(), Some(4));
    }

    #[test]
    fn test_malformed_slide_index_is_none() {
        let session = Session::new(MemoryStore::new().with_entry(SLIDE_KEY, "three"));
        assert_eq!(session.slide_index(), None);
        let session = Session::new(MemoryStore::new().with_entry(SLIDE_KEY, "-2"));
        assert_eq!(session.slide_index(), None);
    }

    #[test]
    fn test_notes_flag_encoding() {
        let mut session = Session::new(MemoryStore::new());
        assert!(!session.notes_visible());
        session.save_notes_visible(true);
        assert_eq!(session.store().get(NOTES_KEY).as_deref(), Some("1"));
        assert!(session.notes_visible());
        session.save_notes_visible(false);
        assert_eq!(session.store().get(NOTES_KEY).as_deref(), Some("0"));
        assert!(!session.notes_visible());
    }

    #[test]
    fn test_older_key_versions_are_ignored() {
        let store = MemoryStore::new()
            .with_entry("closing.show.slide.v11", "7")
            .with_entry("closing.show.notes.v8", "1");
        let session = Session::new(store);
        assert_eq!(session.slide_index(), None);
        assert!(!session.notes_visible());
    }

    #[test]
    fn test_failed_writes_are_suppressed() {
        let mut session = Session::new(ReadOnlyStore);
        session.save_slide_index(2);
        session.save_notes_visible(true);
        assert_eq!(session.slide_index(), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut store = FileStore::open(&path).unwrap();
        store.set(SLIDE_KEY, "5").unwrap();
        store.set(NOTES_KEY, "1").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(SLIDE_KEY).as_deref(), Some("5"));
        assert_eq!(reopened.entries().count(), 2);

        let mut session = Session::new(reopened);
        session.clear().unwrap();
        let cleared = FileStore::open(&path).unwrap();
        assert_eq!(cleared.get(SLIDE_KEY), None);
    }

    #[test]
    fn test_truncated_file_is_replaced_on_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        std::fs::write(&path, format!("{SLIDE_KEY}: \"3")).unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.entries().count(), 0);

        let mut session = Session::new(store);
        assert_eq!(session.slide_index(), None);
        session.clear().unwrap();

        let repaired = std::fs::read_to_string(&path).unwrap();
        assert!(serde_yaml::from_str::<BTreeMap<String, String>>(&repaired).is_ok());
        assert_eq!(FileStore::open(&path).unwrap().entries().count(), 0);
    }

    #[test]
    fn test_corrupt_file_is_overwritten_by_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        std::fs::write(&path, "[not: a map").unwrap();

        let mut session = Session::new(FileStore::open(&path).unwrap());
        session.save_slide_index(4);

        let reopened = Session::new(FileStore::open(&path).unwrap());
        assert_eq!(reopened.slide_index(), Some(4));
    }
}
