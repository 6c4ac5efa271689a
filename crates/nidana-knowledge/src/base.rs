//! Loading the knowledge base from TOML.
//!
//! `KnowledgeBase` parses one TOML document holding the preset symptom list,
//! the condition catalog, the co-occurrence table, and the remedy sheets.
//! After loading, everything is immutable and shared through `Arc`.
//!
//! Loading order:
//!
//! 1. Parse the TOML into `KnowledgeDocument`.
//! 2. Check hard invariants; a violation → `ConfigError`.
//! 3. Normalize the co-occurrence table.
//! 4. Log every soft issue with `warn!` and keep going.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use nidana_contracts::{
    error::{NidanaError, NidanaResult},
    CoOccurrenceTable, ConditionRecord, RemedySheet,
};

use crate::remedies::RemedyBook;
use crate::validate::{check_invariants, collect_issues, KnowledgeIssue};

/// The knowledge base compiled into the binary.
const EMBEDDED_KNOWLEDGE: &str = include_str!("../data/knowledge.toml");

/// The on-disk shape of a knowledge base document.
///
/// Example:
/// ```toml
/// presets = ["headache", "fever"]
///
/// [[conditions]]
/// id = "migraine"
/// display_name = "Migraine"
/// severity = 4
/// symptoms = ["headache", "nausea"]
///
/// [cooccurrence]
/// headache = ["dizziness", "nausea"]
///
/// [[remedies]]
/// id = "migraine"
/// name = "Migraine"
/// description = "A severe headache."
///
/// [[remedies.entries]]
/// title = "Cold Compress"
/// description = "Apply to head and neck for 15 minutes."
/// category = "immediate"
/// ```
#[derive(Debug, Deserialize)]
struct KnowledgeDocument {
    #[serde(default)]
    presets: Vec<String>,
    #[serde(default)]
    conditions: Vec<ConditionRecord>,
    #[serde(default)]
    cooccurrence: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    remedies: Vec<RemedySheet>,
}

/// The immutable tables the engine and the remedy screen read from.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    presets: Vec<String>,
    conditions: Arc<[ConditionRecord]>,
    cooccurrence: Arc<CoOccurrenceTable>,
    remedies: RemedyBook,
}

impl KnowledgeBase {
    /// Parse `s` as a TOML knowledge base.
    ///
    /// Returns `NidanaError::ConfigError` if the TOML is malformed, does not
    /// match the expected shape, or breaks a hard invariant.
    pub fn from_toml_str(s: &str) -> NidanaResult<Self> {
        let doc: KnowledgeDocument = toml::from_str(s).map_err(|e| NidanaError::ConfigError {
            reason: format!("failed to parse knowledge TOML: {}", e),
        })?;

        check_invariants(&doc.conditions, &doc.remedies)?;

        let base = Self {
            presets: doc.presets,
            conditions: doc.conditions.into(),
            cooccurrence: Arc::new(CoOccurrenceTable::new(doc.cooccurrence)),
            remedies: RemedyBook::new(doc.remedies),
        };

        for issue in base.validate() {
            warn!(issue = %issue, "knowledge base issue");
        }

        debug!(
            conditions = base.conditions.len(),
            cooccurrence_entries = base.cooccurrence.len(),
            remedy_sheets = base.remedies.len(),
            presets = base.presets.len(),
            "knowledge base loaded"
        );

        Ok(base)
    }

    /// Read the file at `path` and parse it as a knowledge base.
    pub fn from_file(path: &Path) -> NidanaResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| NidanaError::ConfigError {
            reason: format!("failed to read knowledge file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The knowledge base shipped with NIDANA.
    pub fn embedded() -> NidanaResult<Self> {
        Self::from_toml_str(EMBEDDED_KNOWLEDGE)
    }

    /// Load from `path` when given, otherwise use the embedded knowledge base.
    pub fn load(path: Option<&Path>) -> NidanaResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    /// Soft issues in this knowledge base. Empty for a clean document.
    pub fn validate(&self) -> Vec<KnowledgeIssue> {
        collect_issues(&self.conditions, &self.cooccurrence, self.remedies.sheets())
    }

    pub fn presets(&self) -> &[String] {
        &self.presets
    }

    /// Shared handle to the condition catalog.
    pub fn conditions(&self) -> Arc<[ConditionRecord]> {
        Arc::clone(&self.conditions)
    }

    /// Shared handle to the co-occurrence table.
    pub fn cooccurrence(&self) -> Arc<CoOccurrenceTable> {
        Arc::clone(&self.cooccurrence)
    }

    pub fn remedies(&self) -> &RemedyBook {
        &self.remedies
    }

    pub fn condition(&self, id: &str) -> Option<&ConditionRecord> {
        self.conditions.iter().find(|c| c.id == id)
    }
}
