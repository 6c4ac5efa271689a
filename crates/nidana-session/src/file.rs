//! JSON-file implementation of `SymptomStore`.
//!
//! The whole store is one JSON object mapping keys to string values:
//!
//! ```json
//! { "userSymptoms": "[\"fever\",\"cough\"]" }
//! ```
//!
//! Every call reads the file, and every write rewrites it. A missing file is
//! an empty store. This lets the CLI carry a consultation across separate
//! invocations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, trace};

use nidana_contracts::error::{NidanaError, NidanaResult};
use nidana_core::traits::SymptomStore;

/// A symptom store persisted as a single JSON file.
///
/// Writes within one process are serialized by an internal lock. Two
/// processes writing the same file concurrently can lose updates.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is not touched until first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> NidanaResult<BTreeMap<String, String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "session file absent, treating as empty");
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(self.failed("read", e)),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| self.failed("parse", e))
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> NidanaResult<()> {
        let json = serde_json::to_string_pretty(values).map_err(|e| self.failed("encode", e))?;
        std::fs::write(&self.path, json).map_err(|e| self.failed("write", e))?;
        debug!(path = %self.path.display(), keys = values.len(), "session file written");
        Ok(())
    }

    /// Run a read-modify-write cycle under the in-process lock.
    fn update<F>(&self, change: F) -> NidanaResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.lock.lock().map_err(|e| NidanaError::StoreFailed {
            reason: format!("session file lock poisoned: {}", e),
        })?;

        let mut values = self.read_all()?;
        if change(&mut values) {
            self.write_all(&values)?;
        }
        Ok(())
    }

    fn failed(&self, action: &str, e: impl std::fmt::Display) -> NidanaError {
        NidanaError::StoreFailed {
            reason: format!(
                "failed to {} session file '{}': {}",
                action,
                self.path.display(),
                e
            ),
        }
    }
}

// ── SymptomStore impl ─────────────────────────────────────────────────────────

impl SymptomStore for JsonFileStore {
    fn get(&self, key: &str) -> NidanaResult<Option<String>> {
        let mut values = self.read_all()?;
        Ok(values.remove(key))
    }

    fn set(&self, key: &str, value: String) -> NidanaResult<()> {
        self.update(|values| {
            values.insert(key.to_string(), value);
            true
        })
    }

    fn remove(&self, key: &str) -> NidanaResult<()> {
        // An absent key leaves the file untouched.
        self.update(|values| values.remove(key).is_some())
    }
}
