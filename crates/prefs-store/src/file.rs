//! File-backed preferences store.
//!
//! Values live in memory and are written to a single JSON document on
//! [`flush`](PreferenceStore::flush). Writes are atomic: the document is
//! written to a temp file in the same directory, synced, then renamed over
//! the previous version.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use prefs_types::{Dictionary, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::PreferenceStore;

const DOCUMENT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PreferenceDocument {
    version: u32,
    values: BTreeMap<String, Value>,
}

/// Durable preferences store persisted as a JSON document.
pub struct FilePreferenceStore {
    path: PathBuf,
    values: RwLock<HashMap<String, Value>>,
    dirty: AtomicBool,
    flush_on_drop: bool,
}

impl FilePreferenceStore {
    /// Open the store described by `config`, loading any existing document.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let path = config.resolved_path()?;
        let values = Self::load(&path)?;
        debug!(path = %path.display(), count = values.len(), "opened preferences");
        Ok(Self {
            path,
            values: RwLock::new(values),
            dirty: AtomicBool::new(false),
            flush_on_drop: config.flush_on_drop,
        })
    }

    /// Open a store at an explicit path with default options.
    pub fn with_path(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(&StoreConfig::at_path(path))
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if there are writes not yet flushed to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    fn load(path: &Path) -> StoreResult<HashMap<String, Value>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path)?;
        let document: PreferenceDocument = serde_json::from_str(&content)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        if document.version != DOCUMENT_VERSION {
            return Err(StoreError::Serialization(format!(
                "unsupported document version {}",
                document.version
            )));
        }
        Ok(document.values.into_iter().collect())
    }

    fn write_document(&self, values: BTreeMap<String, Value>) -> StoreResult<()> {
        let document = PreferenceDocument {
            version: DOCUMENT_VERSION,
            values,
        };
        let content = serde_json::to_vec_pretty(&document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(&content)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, name: &str) -> Option<Value> {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        map.get(name).cloned()
    }

    fn set(&self, name: &str, value: Value) {
        debug!(name, kind = %value.kind(), "set preference");
        let mut map = self.values.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(name.to_owned(), value);
        self.mark_dirty();
    }

    fn remove(&self, name: &str) -> bool {
        let mut map = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let existed = map.remove(name).is_some();
        if existed {
            debug!(name, "removed preference");
            self.mark_dirty();
        }
        existed
    }

    fn keys(&self) -> Vec<String> {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn contains(&self, name: &str) -> bool {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        map.contains_key(name)
    }

    fn snapshot(&self) -> Dictionary {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn flush(&self) -> StoreResult<()> {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        let values = self.snapshot();
        match self.write_document(values) {
            Ok(()) => {
                debug!(path = %self.path.display(), "flushed preferences");
                Ok(())
            }
            Err(e) => {
                self.mark_dirty();
                Err(e)
            }
        }
    }
}

impl Drop for FilePreferenceStore {
    fn drop(&mut self) {
        if !self.flush_on_drop {
            return;
        }
        if let Err(e) = self.flush() {
            warn!(path = %self.path.display(), error = %e, "failed to flush preferences on drop");
        }
    }
}

impl std::fmt::Debug for FilePreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("FilePreferenceStore")
            .field("path", &self.path)
            .field("value_count", &count)
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
