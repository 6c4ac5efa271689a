//! Knowledge base validation.
//!
//! Two tiers:
//!
//! - **Invariants** (`check_invariants`) reject the document outright:
//!   duplicate condition ids, duplicate remedy ids, blank ids, and severities
//!   outside 1–5.
//! - **Issues** (`collect_issues`) are reported but accepted. An empty
//!   vocabulary never matches and a self-listed co-occurrence is filtered out
//!   by the suggester anyway; the engine copes with both.

use std::collections::HashSet;
use std::fmt;

use nidana_contracts::{
    error::{NidanaError, NidanaResult},
    CoOccurrenceTable, ConditionRecord, RemedySheet,
};

/// Lowest accepted condition severity.
pub const MIN_SEVERITY: u8 = 1;

/// Highest accepted condition severity.
pub const MAX_SEVERITY: u8 = 5;

/// A soft problem found in a loaded knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeIssue {
    /// The condition has no symptom vocabulary and can never match.
    EmptyVocabulary { condition: String },
    /// A co-occurrence entry lists its own key as related.
    SelfListed { symptom: String },
    /// A condition has no remedy sheet.
    MissingRemedies { condition: String },
    /// A remedy sheet does not belong to any catalog condition.
    OrphanRemedies { id: String },
}

impl fmt::Display for KnowledgeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeIssue::EmptyVocabulary { condition } => {
                write!(f, "condition '{}' has an empty symptom vocabulary", condition)
            }
            KnowledgeIssue::SelfListed { symptom } => {
                write!(f, "co-occurrence entry '{}' lists itself as related", symptom)
            }
            KnowledgeIssue::MissingRemedies { condition } => {
                write!(f, "condition '{}' has no remedy sheet", condition)
            }
            KnowledgeIssue::OrphanRemedies { id } => {
                write!(f, "remedy sheet '{}' matches no catalog condition", id)
            }
        }
    }
}

/// Reject documents that break a hard invariant.
pub fn check_invariants(conditions: &[ConditionRecord], remedies: &[RemedySheet]) -> NidanaResult<()> {
    let mut seen = HashSet::new();
    for condition in conditions {
        if condition.id.trim().is_empty() {
            return Err(config_error(format!(
                "condition '{}' has a blank id",
                condition.display_name
            )));
        }
        if !seen.insert(condition.id.as_str()) {
            return Err(config_error(format!("duplicate condition id '{}'", condition.id)));
        }
        if let Some(severity) = condition.severity {
            if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
                return Err(config_error(format!(
                    "condition '{}' has severity {} outside {}-{}",
                    condition.id, severity, MIN_SEVERITY, MAX_SEVERITY
                )));
            }
        }
    }

    let mut seen = HashSet::new();
    for sheet in remedies {
        if !seen.insert(sheet.id.as_str()) {
            return Err(config_error(format!("duplicate remedy sheet id '{}'", sheet.id)));
        }
    }

    Ok(())
}

/// Collect every soft issue, in a stable order.
pub fn collect_issues(
    conditions: &[ConditionRecord],
    cooccurrence: &CoOccurrenceTable,
    remedies: &[RemedySheet],
) -> Vec<KnowledgeIssue> {
    let mut issues = Vec::new();

    for condition in conditions {
        if condition.symptoms.is_empty() {
            issues.push(KnowledgeIssue::EmptyVocabulary {
                condition: condition.id.clone(),
            });
        }
    }

    for (symptom, related) in cooccurrence.iter() {
        if related.iter().any(|r| r == symptom) {
            issues.push(KnowledgeIssue::SelfListed {
                symptom: symptom.to_string(),
            });
        }
    }

    let sheet_ids: HashSet<&str> = remedies.iter().map(|s| s.id.as_str()).collect();
    let condition_ids: HashSet<&str> = conditions.iter().map(|c| c.id.as_str()).collect();

    for condition in conditions {
        if !sheet_ids.contains(condition.id.as_str()) {
            issues.push(KnowledgeIssue::MissingRemedies {
                condition: condition.id.clone(),
            });
        }
    }
    for sheet in remedies {
        if !condition_ids.contains(sheet.id.as_str()) {
            issues.push(KnowledgeIssue::OrphanRemedies { id: sheet.id.clone() });
        }
    }

    issues
}

fn config_error(reason: String) -> NidanaError {
    NidanaError::ConfigError { reason }
}
