//! Error types for claim analysis.
//!
//! Only structural problems with the input abort a run. Everything a drafter
//! can reasonably get wrong is reported as a [`Diagnostic`](crate::Diagnostic)
//! instead.

use thiserror::Error;

use crate::SpanKind;

/// Errors raised while marking element spans in a single claim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// An escape toggle has no partner.
    #[error("unpaired escape toggle '`'")]
    UnpairedEscape,

    /// A span was opened while another span was still open.
    #[error("{kind} span opened inside an open {open} span at index {offset}: \"{window}\"")]
    NestedSpan {
        kind: SpanKind,
        open: SpanKind,
        offset: usize,
        window: String,
    },

    /// A closer appeared with no open span of its kind.
    #[error("{kind} span closed without a matching opener at index {offset}: \"{window}\"")]
    UnmatchedClose {
        kind: SpanKind,
        offset: usize,
        window: String,
    },

    /// Opener and closer counts differ after annotation.
    #[error("{kind} markers are unbalanced: {opened} opened, {closed} closed")]
    Unbalanced {
        kind: SpanKind,
        opened: usize,
        closed: usize,
    },

    /// A `|` survived both closing passes.
    #[error("element terminator '|' outside of any element at index {offset}: \"{window}\"")]
    StrayTerminator { offset: usize, window: String },
}

/// Errors that abort a whole analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// A claim number appeared twice.
    #[error("claim {number} appears more than once")]
    DuplicateClaim { number: u32 },

    /// Claim numbers must be strictly increasing.
    #[error("claim {number} is out of order, it follows claim {previous}")]
    OutOfOrder { number: u32, previous: u32 },

    /// Nothing remained of the claim after markup was removed.
    #[error("claim {number} has no text")]
    EmptyClaim { number: u32 },

    /// The claim's markup could not be resolved into element spans.
    #[error("claim {claim}: {source}")]
    Annotation {
        claim: u32,
        #[source]
        source: AnnotationError,
    },
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, FatalError>;
