//! Remedy sheets: read-only display content keyed by condition id.

use serde::{Deserialize, Serialize};

/// When in the course of a condition a remedy applies.
///
/// Written in kebab-case in the knowledge base:
/// ```toml
/// category = "immediate"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemedyCategory {
    Immediate,
    Daily,
    Dietary,
    Lifestyle,
}

impl RemedyCategory {
    /// Human-readable label used when rendering a sheet.
    pub fn label(self) -> &'static str {
        match self {
            RemedyCategory::Immediate => "Immediate Relief",
            RemedyCategory::Daily => "Daily Care",
            RemedyCategory::Dietary => "Dietary",
            RemedyCategory::Lifestyle => "Lifestyle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remedy {
    pub title: String,
    pub description: String,
    pub category: RemedyCategory,
}

/// Everything shown for one condition on the remedies screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemedySheet {
    /// Matches `ConditionRecord::id`.
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, rename = "entries")]
    pub remedies: Vec<Remedy>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub when_to_see_doctor: Vec<String>,
}
