//! Condition catalog entries and the match results derived from them.

use serde::{Deserialize, Serialize};

/// One entry in the static condition catalog.
///
/// Loaded once from the knowledge base and shared read-only by every
/// matching call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Unique across the catalog. Also the key into the remedy book.
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// 1 (mild) to 5 (severe) when present.
    #[serde(default)]
    pub severity: Option<u8>,
    /// Symptom vocabulary in catalog order. An empty vocabulary never matches.
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// A ranked candidate produced by the condition matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub condition_id: String,
    pub display_name: String,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub severity: Option<u8>,
    /// Clamped score, always within `(10, 95]` for emitted results.
    pub score: u32,
}

impl MatchResult {
    /// Build a result for `condition` carrying an already clamped score.
    pub fn from_condition(condition: &ConditionRecord, score: u32) -> Self {
        Self {
            condition_id: condition.id.clone(),
            display_name: condition.display_name.clone(),
            scientific_name: condition.scientific_name.clone(),
            description: condition.description.clone(),
            severity: condition.severity,
            score,
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

/// Coarse display band for a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    Low,
    Moderate,
    Elevated,
    High,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::High
        } else if score >= 60 {
            ScoreBand::Elevated
        } else if score >= 40 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Low => "low",
            ScoreBand::Moderate => "moderate",
            ScoreBand::Elevated => "elevated",
            ScoreBand::High => "high",
        }
    }
}
