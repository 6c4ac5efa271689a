//! # nidana-contracts
//!
//! Shared types and contracts for the NIDANA symptom engine.
//!
//! Every crate in the workspace imports from here. Apart from symptom
//! normalization and the intake rules of `SymptomSet`, no logic lives in
//! this crate.

pub mod condition;
pub mod cooccurrence;
pub mod error;
pub mod remedy;
pub mod symptom;

pub use condition::{ConditionRecord, MatchResult, ScoreBand};
pub use cooccurrence::CoOccurrenceTable;
pub use error::{NidanaError, NidanaResult};
pub use remedy::{Remedy, RemedyCategory, RemedySheet};
pub use symptom::{normalize, SymptomSet};
