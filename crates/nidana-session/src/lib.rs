//! # nidana-session
//!
//! `SymptomStore` implementations for the NIDANA consultation flow.
//!
//! - [`InMemorySymptomStore`] lives for one process. Use it for a single
//!   interactive consultation or in tests.
//! - [`JsonFileStore`] persists to a JSON file so a consultation can span
//!   several CLI invocations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nidana_session::JsonFileStore;
//! use nidana_core::traits::SymptomStore;
//!
//! let store = JsonFileStore::open(".nidana-session.json");
//! store.set("userSymptoms", r#"["fever"]"#.to_string())?;
//! ```

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemorySymptomStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::thread;

    use nidana_contracts::error::NidanaError;
    use nidana_core::traits::SymptomStore;

    use super::{InMemorySymptomStore, JsonFileStore};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Behaviour every store must share.
    fn exercise_store(store: &dyn SymptomStore) {
        assert_eq!(store.get("userSymptoms").unwrap(), None);

        store.set("userSymptoms", r#"["fever"]"#.to_string()).unwrap();
        assert_eq!(
            store.get("userSymptoms").unwrap().as_deref(),
            Some(r#"["fever"]"#)
        );

        store.set("userSymptoms", r#"["cough"]"#.to_string()).unwrap();
        assert_eq!(
            store.get("userSymptoms").unwrap().as_deref(),
            Some(r#"["cough"]"#)
        );

        store.set("finalSymptoms", "[]".to_string()).unwrap();
        store.remove("userSymptoms").unwrap();
        assert_eq!(store.get("userSymptoms").unwrap(), None);
        assert_eq!(store.get("finalSymptoms").unwrap().as_deref(), Some("[]"));

        // Removing an absent key is not an error.
        store.remove("userSymptoms").unwrap();
    }

    // ── InMemorySymptomStore ──────────────────────────────────────────────────

    #[test]
    fn in_memory_store_behaves_as_a_store() {
        let store = InMemorySymptomStore::new();
        exercise_store(&store);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn in_memory_clones_share_values() {
        let store = InMemorySymptomStore::new();
        let observer = store.clone();

        store.set("userSymptoms", "[]".to_string()).unwrap();

        assert_eq!(observer.get("userSymptoms").unwrap().as_deref(), Some("[]"));
        assert!(!observer.is_empty());
    }

    #[test]
    fn in_memory_store_is_shareable_across_threads() {
        let store = InMemorySymptomStore::new();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || store.set(&format!("key-{i}"), i.to_string()).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 4);
        assert_eq!(store.get("key-2").unwrap().as_deref(), Some("2"));
    }

    // ── JsonFileStore ─────────────────────────────────────────────────────────

    #[test]
    fn file_store_behaves_as_a_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("session.json"));
        exercise_store(&store);
    }

    #[test]
    fn file_store_missing_file_is_empty_and_not_created_by_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = JsonFileStore::open(&path);

        assert_eq!(store.get("userSymptoms").unwrap(), None);
        store.remove("userSymptoms").unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        JsonFileStore::open(&path)
            .set("finalSymptoms", r#"["headache","nausea"]"#.to_string())
            .unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(
            reopened.get("finalSymptoms").unwrap().as_deref(),
            Some(r#"["headache","nausea"]"#)
        );
    }

    #[test]
    fn file_store_writes_a_json_object_of_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = JsonFileStore::open(&path);

        store.set("userSymptoms", r#"["fever"]"#.to_string()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["userSymptoms"], r#"["fever"]"#);
    }

    #[test]
    fn file_store_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "  \n").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("userSymptoms").unwrap(), None);
    }

    #[test]
    fn file_store_corrupt_file_is_store_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path);

        match store.get("userSymptoms") {
            Err(NidanaError::StoreFailed { reason }) => {
                assert!(reason.contains("failed to parse session file"), "got: {reason}");
            }
            other => panic!("expected StoreFailed, got {:?}", other),
        }
        assert!(matches!(
            store.set("userSymptoms", "[]".to_string()),
            Err(NidanaError::StoreFailed { .. })
        ));
    }

    #[test]
    fn file_store_in_missing_directory_fails_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("no-such-dir").join("session.json"));

        assert!(matches!(
            store.set("userSymptoms", "[]".to_string()),
            Err(NidanaError::StoreFailed { .. })
        ));
    }
}
