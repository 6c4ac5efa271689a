//! In-memory implementation of `SymptomStore`.
//!
//! `InMemorySymptomStore` keeps every value in a `HashMap` behind an
//! `Arc<Mutex<_>>`. Clones share the same map, so a caller can keep a clone
//! and inspect what the consultation flow wrote.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::trace;

use nidana_contracts::error::{NidanaError, NidanaResult};
use nidana_core::traits::SymptomStore;

/// A process-local symptom store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct InMemorySymptomStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemorySymptomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn values(&self) -> NidanaResult<MutexGuard<'_, HashMap<String, String>>> {
        self.values.lock().map_err(|e| NidanaError::StoreFailed {
            reason: format!("symptom store lock poisoned: {}", e),
        })
    }
}

// ── SymptomStore impl ─────────────────────────────────────────────────────────

impl SymptomStore for InMemorySymptomStore {
    fn get(&self, key: &str) -> NidanaResult<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> NidanaResult<()> {
        trace!(key = %key, bytes = value.len(), "storing value");
        self.values()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> NidanaResult<()> {
        self.values()?.remove(key);
        Ok(())
    }
}
