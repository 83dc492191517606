use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Key -> blob persistence. Each `set` fully replaces the previous value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key under a data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        // write a sibling temp file, then rename over the target
        let target = self.path_for(key);
        let tmp = self.root.join(format!(".{key}.json.tmp"));

        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(value.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&tmp, &target).map_err(io_err)
    }
}

pub fn init_store(data_dir: &Path) -> FileStore {
    fs::create_dir_all(data_dir).expect("Failed to create data directory");
    FileStore::new(data_dir)
}

#[cfg(test)]
pub use memory::MemoryStore;


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn file_store_overwrites_whole_blob() {
        let dir = TempDir::new().unwrap();
        let store = init_store(dir.path());

        store.set("k", "[1,2,3]").unwrap();
        store.set("k", "[]").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join(".k.json.tmp").exists());
    }

    #[test]
    fn memory_store_set_then_get() {
        let store = MemoryStore::default();
        store.set("a", "x").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("x"));
        assert!(store.get("b").unwrap().is_none());
    }
}
