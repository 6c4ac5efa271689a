//! The co-occurrence suggester.

use std::sync::Arc;

use tracing::debug;

use nidana_contracts::{normalize, CoOccurrenceTable};
use nidana_core::traits::SymptomSuggester;

use crate::rank::FirstSeen;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 8;

/// Suggest symptoms related to `current` that the user has not entered.
///
/// Each current symptom is normalized and looked up in `table`; related
/// symptoms are collected in first-seen order. A related symptom is skipped
/// when it equals one of the raw `current` entries ignoring case. Only exact
/// equality counts here: "sore throat" does not exclude "throat".
pub fn suggest_symptoms<S: AsRef<str>>(current: &[S], table: &CoOccurrenceTable) -> Vec<String> {
    let mut accumulator = FirstSeen::new();

    for symptom in current {
        let Some(related) = table.related(&normalize(symptom.as_ref())) else {
            continue;
        };
        for candidate in related {
            if !already_entered(candidate, current) {
                accumulator.insert(candidate);
            }
        }
    }

    let suggestions = accumulator.into_vec(MAX_SUGGESTIONS);
    debug!(
        current = current.len(),
        suggestions = suggestions.len(),
        "co-occurring symptoms suggested"
    );
    suggestions
}

fn already_entered<S: AsRef<str>>(candidate: &str, current: &[S]) -> bool {
    let candidate = candidate.to_lowercase();
    current
        .iter()
        .any(|entered| entered.as_ref().to_lowercase() == candidate)
}

/// A `SymptomSuggester` over a shared, immutable co-occurrence table.
#[derive(Debug, Clone)]
pub struct CoOccurrenceSuggester {
    table: Arc<CoOccurrenceTable>,
}

impl CoOccurrenceSuggester {
    pub fn new(table: impl Into<Arc<CoOccurrenceTable>>) -> Self {
        Self { table: table.into() }
    }
}

impl SymptomSuggester for CoOccurrenceSuggester {
    fn suggest(&self, current: &[String]) -> Vec<String> {
        suggest_symptoms(current, &self.table)
    }
}
