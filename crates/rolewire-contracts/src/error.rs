//! Error types for operations around the policy compiler.
//!
//! The compiler itself never fails; malformed policies degrade into a
//! non-compatible model. Errors only arise at the edges: reading a role
//! document from disk or parsing one out of a JSON string.

use thiserror::Error;

/// The unified error type for the rolewire crates.
#[derive(Debug, Error)]
pub enum RolewireError {
    /// A document could not be parsed as the expected JSON structure.
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// A file could not be read.
    #[error("failed to read '{path}': {reason}")]
    Io { path: String, reason: String },
}

/// Convenience alias used throughout the rolewire crates.
pub type RolewireResult<T> = Result<T, RolewireError>;
