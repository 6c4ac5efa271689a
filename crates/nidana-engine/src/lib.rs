//! # nidana-engine
//!
//! The symptom-matching and suggestion engine.
//!
//! Two pure functions make up the engine:
//!
//! - [`match_conditions`] turns a symptom list into ranked condition matches
//!   using substring-containment scoring.
//! - [`suggest_symptoms`] proposes co-occurring symptoms from a static
//!   adjacency table.
//!
//! [`WeightedMatcher`] and [`CoOccurrenceSuggester`] wrap them as the
//! `ConditionMatcher` / `SymptomSuggester` implementations used by
//! `nidana_core::Consultation`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use nidana_engine::{match_conditions, suggest_symptoms};
//!
//! let suggestions = suggest_symptoms(&["fever"], &table);
//! let matches = match_conditions(&["headache", "nausea"], &catalog);
//! ```

pub mod matcher;
pub mod rank;
pub mod scoring;
pub mod suggester;

pub use matcher::{match_conditions, WeightedMatcher, MAX_MATCHES};
pub use scoring::{
    PairMatch, Tally, EXACT_MATCH_POINTS, INCLUSION_THRESHOLD, MULTI_MATCH_BONUS,
    PARTIAL_MATCH_POINTS, SCORE_CAP,
};
pub use suggester::{suggest_symptoms, CoOccurrenceSuggester, MAX_SUGGESTIONS};

// ── Tests ─────────────────────────────────────────────────────────────────────
