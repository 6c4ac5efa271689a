//! Scoring weights and per-condition tallying.
//!
//! These numbers are the whole model. Changing any of them changes every
//! ranking the engine produces.

use nidana_contracts::normalize;

/// Points for a user symptom equal to a vocabulary symptom.
pub const EXACT_MATCH_POINTS: u32 = 30;

/// Points for a user symptom that contains, or is contained in, a vocabulary symptom.
pub const PARTIAL_MATCH_POINTS: u32 = 15;

/// Bonus per matched pair, applied only when more than one pair matched.
pub const MULTI_MATCH_BONUS: u32 = 10;

/// A condition is emitted only when its raw score is strictly above this.
pub const INCLUSION_THRESHOLD: u32 = 10;

/// Reported scores are clamped to this value.
pub const SCORE_CAP: u32 = 95;

/// How one (user symptom, vocabulary symptom) pair compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairMatch {
    Exact,
    Partial,
}

impl PairMatch {
    /// Compare two normalized symptoms.
    ///
    /// Containment is checked in both directions, so "runny" partially
    /// matches "runny nose" and "joint pain" partially matches "pain".
    pub fn of(user: &str, vocabulary: &str) -> Option<Self> {
        if user == vocabulary {
            Some(PairMatch::Exact)
        } else if user.contains(vocabulary) || vocabulary.contains(user) {
            Some(PairMatch::Partial)
        } else {
            None
        }
    }

    pub fn points(self) -> u32 {
        match self {
            PairMatch::Exact => EXACT_MATCH_POINTS,
            PairMatch::Partial => PARTIAL_MATCH_POINTS,
        }
    }
}

/// Running score for one condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Sum of pair points, before the multi-match bonus.
    pub points: u32,
    /// Number of matched pairs. One user symptom may match several
    /// vocabulary entries and is counted once per entry.
    pub matched: u32,
}

impl Tally {
    /// Score every pair of `user` (already normalized) against `vocabulary`.
    pub fn score(user: &[String], vocabulary: &[String]) -> Self {
        let vocabulary: Vec<String> = vocabulary.iter().map(|v| normalize(v)).collect();
        let mut tally = Tally::default();

        for user_symptom in user {
            for vocab_symptom in &vocabulary {
                if let Some(pair) = PairMatch::of(user_symptom, vocab_symptom) {
                    tally.points += pair.points();
                    tally.matched += 1;
                }
            }
        }
        tally
    }

    /// Raw match score including the multi-match bonus.
    pub fn raw(&self) -> u32 {
        if self.matched > 1 {
            self.points + self.matched * MULTI_MATCH_BONUS
        } else {
            self.points
        }
    }

    pub fn qualifies(&self) -> bool {
        self.raw() > INCLUSION_THRESHOLD
    }

    /// The score shown to the user: the raw score clamped to `SCORE_CAP`.
    pub fn reported(&self) -> u32 {
        self.raw().min(SCORE_CAP)
    }
}
