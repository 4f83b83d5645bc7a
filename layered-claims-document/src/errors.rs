//! Error types for reading claims, specifications and rule tables.

use thiserror::Error;

/// Errors that can occur while loading input documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A file could not be read.
    #[error("failed to read {path}: {message}")]
    Load { path: String, message: String },

    /// A claim started with something other than a number.
    #[error("invalid claim number \"{number}\" at line {line}")]
    ClaimNumber { line: usize, number: String },

    /// No line of the claims text started a claim.
    #[error("no claims found")]
    NoClaims,

    /// A rule table or phrase table is not valid TOML for its schema.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// The same pattern appears twice in one rule table.
    #[error("duplicate pattern in {path}: {pattern}")]
    DuplicatePattern { path: String, pattern: String },

    /// A rule pattern is not a valid regex.
    #[error("invalid pattern in {path}: {pattern}")]
    Pattern {
        path: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
