use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

const DATA_FILE: &str = "data.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value persistence port. Values are serialized JSON text.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// One storage handle shared by every store of a dashboard.
pub type SharedStorage = Rc<RefCell<dyn KeyValueStore>>;

pub fn shared<S: KeyValueStore + 'static>(storage: S) -> SharedStorage {
    Rc::new(RefCell::new(storage))
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// All keys in a single `data.json`, rewritten whole on every `set`.
pub struct FileStorage {
    storage_path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the store under `data_dir`. A missing data file starts the
    /// session empty; an unreadable or malformed one is first moved aside to
    /// `data.json.corrupt` so the next write cannot overwrite it.
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let storage_path = data_dir.as_ref().join(DATA_FILE);
        let entries = match Self::read_entries(&storage_path) {
            Ok(entries) => entries,
            Err(err) => {
                let aside = Self::corrupt_path(&storage_path);
                tracing::warn!(
                    path = %storage_path.display(),
                    moved_to = %aside.display(),
                    error = %err,
                    "ignoring unreadable data file"
                );
                if let Err(err) = fs::rename(&storage_path, &aside) {
                    tracing::warn!(path = %storage_path.display(), error = %err, "could not move data file aside");
                }
                BTreeMap::new()
            }
        };
        Self {
            storage_path,
            entries,
        }
    }

    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(crate::metadata::PKG_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    fn corrupt_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Persist through a temporary file and an atomic rename to avoid
    /// partial writes.
    pub fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.storage_path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(&self.entries)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.storage_path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.save()
    }
}

/// Reads and decodes one key, `None` when missing, unreadable or malformed.
pub fn read_value<T: DeserializeOwned>(storage: &SharedStorage, key: &str) -> Option<T> {
    let raw = match storage.borrow().get(key) {
        Ok(raw) => raw?,
        Err(err) => {
            tracing::warn!(key, error = %err, "storage read failed; using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed stored value; using default");
            None
        }
    }
}

/// Writes raw JSON text under `key`, logging instead of propagating failure.
pub fn write_raw(storage: &SharedStorage, key: &str, raw: String) -> bool {
    match storage.borrow_mut().set(key, raw) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(key, error = %err, "storage write failed; keeping in-memory state");
            false
        }
    }
}

/// A persisted value owned by one store. Every mutation is written through
/// immediately; write failures never reach the caller.
pub struct Slot<T> {
    key: &'static str,
    value: T,
    storage: SharedStorage,
}

impl<T: Serialize + DeserializeOwned> Slot<T> {
    pub fn load(storage: &SharedStorage, key: &'static str, default: impl FnOnce() -> T) -> Self {
        let value = read_value(storage, key).unwrap_or_else(default);
        Self {
            key,
            value,
            storage: Rc::clone(storage),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.persist();
        out
    }

    pub fn replace(&mut self, value: T) {
        self.update(|slot| *slot = value);
    }

    /// Replaces the session value without writing it back.
    pub fn set_in_memory(&mut self, value: T) {
        self.value = value;
    }

    /// Re-reads the persisted value, as after an import.
    pub fn reload(&mut self, default: impl FnOnce() -> T) {
        self.value = read_value(&self.storage, self.key).unwrap_or_else(default);
    }

    fn persist(&self) {
        match serde_json::to_string(&self.value) {
            Ok(raw) => {
                write_raw(&self.storage, self.key, raw);
            }
            Err(err) => {
                tracing::warn!(key = self.key, error = %err, "could not serialize value");
            }
        }
    }
}
