//! # nidana-core
//!
//! The trait seams of the NIDANA symptom engine and the consultation flow
//! that wires them together.
//!
//! This crate provides:
//! - The four traits (`ConditionMatcher`, `SymptomSuggester`, `SymptomStore`,
//!   `RemedyCatalog`)
//! - `Consultation`, which drives intake → confirm → predict → remedies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nidana_core::{Consultation, traits::{ConditionMatcher, SymptomSuggester}};
//! ```

pub mod consultation;
pub mod traits;

pub use consultation::{Consultation, Prediction, FINAL_SYMPTOMS_KEY, USER_SYMPTOMS_KEY};
