//! Error types for the NIDANA workspace.
//!
//! The matching engine itself is infallible. Everything around it (loading
//! the knowledge base, handing symptom sets between consultation steps,
//! looking up remedies) returns `NidanaResult<T>`.

use thiserror::Error;

/// The unified error type for NIDANA.
#[derive(Debug, Error)]
pub enum NidanaError {
    /// The knowledge base could not be read, parsed, or violates a hard invariant.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Intake was attempted with an empty symptom set.
    #[error("no symptoms provided: add at least one symptom")]
    NoSymptoms,

    /// A consultation step needed stored symptoms that are not there.
    ///
    /// Callers should send the user back to intake.
    #[error("no stored symptoms under '{key}'")]
    SymptomsMissing { key: String },

    /// Stored symptom data exists but is not a JSON array of strings.
    #[error("stored symptoms under '{key}' are corrupt: {reason}")]
    SessionCorrupt { key: String, reason: String },

    /// The persistence backend failed to read or write.
    #[error("symptom store failed: {reason}")]
    StoreFailed { reason: String },

    /// No remedy sheet exists for the requested condition.
    #[error("unknown condition '{id}'")]
    UnknownCondition { id: String },
}

/// Convenience alias used throughout the NIDANA crates.
pub type NidanaResult<T> = Result<T, NidanaError>;
