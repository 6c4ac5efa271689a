//! Core trait definitions for the NIDANA consultation flow.
//!
//! - `ConditionMatcher`: ranks catalog conditions for a symptom set
//! - `SymptomSuggester`: proposes co-occurring symptoms
//! - `SymptomStore`: hands symptom sets between consultation steps
//! - `RemedyCatalog`: read-only remedy content keyed by condition id
//!
//! Matcher and suggester are pure: same input, same output, no I/O.

use nidana_contracts::{error::NidanaResult, MatchResult, RemedySheet};

/// Ranks conditions against a set of user-reported symptoms.
pub trait ConditionMatcher: Send + Sync {
    /// Return ranked matches, best first.
    ///
    /// An empty symptom list yields an empty result. Never fails: a symptom
    /// absent from every vocabulary simply contributes nothing.
    fn rank(&self, symptoms: &[String]) -> Vec<MatchResult>;
}

/// Suggests symptoms that commonly accompany the ones already entered.
pub trait SymptomSuggester: Send + Sync {
    /// Return suggestions not already present in `current`, best first.
    fn suggest(&self, current: &[String]) -> Vec<String>;
}

/// A string-keyed, string-valued store for handing state between steps.
///
/// Values are opaque to the store; the consultation flow writes JSON.
pub trait SymptomStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> NidanaResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> NidanaResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> NidanaResult<()>;
}

/// Read-only catalog of remedy sheets.
pub trait RemedyCatalog: Send + Sync {
    /// Look up the sheet for `condition_id`.
    fn lookup(&self, condition_id: &str) -> Option<&RemedySheet>;

    /// Every condition id that has a sheet.
    fn ids(&self) -> Vec<&str>;
}
