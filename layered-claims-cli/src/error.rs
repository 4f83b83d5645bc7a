//! Errors that stop `claimlint` before or around the analysis itself.

use std::io;

use layered_claims_document::DocumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("failed to read run configuration {path}: {message}")]
    Config { path: String, message: String },

    #[error("no claims file given")]
    MissingClaims,

    #[error("invalid filter regex: {pattern}")]
    Filter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid phrase table")]
    PhraseTable(#[source] regex::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
