//! # nidana-knowledge
//!
//! The static tables behind NIDANA, loaded from TOML.
//!
//! ## Overview
//!
//! [`KnowledgeBase`] holds the condition catalog, the co-occurrence table,
//! the remedy sheets, and the preset symptom list. A default knowledge base
//! is compiled into the crate; a file with the same shape can replace it.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use nidana_knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::embedded()?;
//! let matcher = nidana_engine::WeightedMatcher::new(kb.conditions());
//! ```

pub mod base;
pub mod remedies;
pub mod validate;

pub use base::KnowledgeBase;
pub use remedies::RemedyBook;
pub use validate::KnowledgeIssue;

// ── Tests ─────────────────────────────────────────────────────────────────────
