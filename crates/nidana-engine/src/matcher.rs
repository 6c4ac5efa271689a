//! The condition matcher.
//!
//! Algorithm, per condition in catalog order:
//!
//! 1. Compare every (user symptom, vocabulary symptom) pair, both normalized:
//!    equal → +30, containment either way → +15.
//! 2. If more than one pair matched, add 10 per matched pair.
//! 3. Keep the condition only if the raw score is above 10.
//! 4. Clamp the reported score to 95.
//!
//! Kept conditions are then sorted by reported score (stable, so ties keep
//! catalog order) and cut to the best six.

use std::sync::Arc;

use tracing::{debug, trace};

use nidana_contracts::{normalize, ConditionRecord, MatchResult};
use nidana_core::traits::ConditionMatcher;

use crate::rank::top_by_key;
use crate::scoring::Tally;

/// Maximum number of ranked conditions returned.
pub const MAX_MATCHES: usize = 6;

/// Rank `catalog` against `user_symptoms`.
///
/// Pure and infallible. An empty symptom list, or a catalog entry with an
/// empty vocabulary, simply produces no match.
pub fn match_conditions<S: AsRef<str>>(
    user_symptoms: &[S],
    catalog: &[ConditionRecord],
) -> Vec<MatchResult> {
    let user: Vec<String> = user_symptoms.iter().map(|s| normalize(s.as_ref())).collect();
    if user.is_empty() {
        return Vec::new();
    }

    let mut kept = Vec::new();
    for condition in catalog {
        let tally = Tally::score(&user, &condition.symptoms);

        trace!(
            condition = %condition.id,
            points = tally.points,
            matched = tally.matched,
            raw = tally.raw(),
            "condition scored"
        );

        if tally.qualifies() {
            kept.push(MatchResult::from_condition(condition, tally.reported()));
        }
    }

    let ranked = top_by_key(kept, MAX_MATCHES, |m| m.score);

    debug!(
        symptoms = user.len(),
        conditions = catalog.len(),
        matches = ranked.len(),
        "conditions ranked"
    );
    ranked
}

/// A `ConditionMatcher` over a shared, immutable catalog.
#[derive(Debug, Clone)]
pub struct WeightedMatcher {
    catalog: Arc<[ConditionRecord]>,
}

impl WeightedMatcher {
    pub fn new(catalog: impl Into<Arc<[ConditionRecord]>>) -> Self {
        Self { catalog: catalog.into() }
    }

    pub fn catalog(&self) -> &[ConditionRecord] {
        &self.catalog
    }
}

impl ConditionMatcher for WeightedMatcher {
    fn rank(&self, symptoms: &[String]) -> Vec<MatchResult> {
        match_conditions(symptoms, &self.catalog)
    }
}
