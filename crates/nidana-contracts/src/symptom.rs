//! Symptom tokens and the ordered symptom set built at intake.

use serde::{Deserialize, Serialize};

/// Normalize a free-text symptom for comparison.
///
/// Trims surrounding whitespace and lowercases. Two symptoms are the same
/// token iff their normalized forms are equal.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// An ordered set of raw symptom strings as entered by the user.
///
/// Membership is by exact string. Normalization is left to the engine so
/// the user's own spelling is what gets stored and displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomSet {
    inner: Vec<String>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every comma-separated symptom in `input`.
    ///
    /// Each piece is trimmed; empty pieces and pieces already in the set are
    /// skipped. Returns how many symptoms were added.
    pub fn add_free_text(&mut self, input: &str) -> usize {
        let mut added = 0;
        for piece in input.split(',').map(str::trim) {
            if !piece.is_empty() && !self.contains(piece) {
                self.inner.push(piece.to_string());
                added += 1;
            }
        }
        added
    }

    /// Add a single preset symptom unless it is already present.
    pub fn add_preset(&mut self, symptom: &str) -> bool {
        if self.contains(symptom) {
            return false;
        }
        self.inner.push(symptom.to_string());
        true
    }

    /// Remove `symptom` (exact string). Returns true if it was present.
    pub fn remove(&mut self, symptom: &str) -> bool {
        let before = self.inner.len();
        self.inner.retain(|s| s != symptom);
        self.inner.len() != before
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.inner.iter().any(|s| s == symptom)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.inner
    }
}

impl FromIterator<String> for SymptomSet {
    /// Collect raw strings, keeping first occurrences only.
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = SymptomSet::new();
        for symptom in iter {
            set.add_preset(&symptom);
        }
        set
    }
}
