//! Element annotation: marking new elements `{…}` and references `[…]`.
//!
//! A claim is annotated in stages over a stream of [`Piece`]s:
//!
//! 1. escape spans are stripped and the source text is scanned once for
//!    quantifiers, articles, boundary phrases and author markup, producing
//!    automatic openers and boundary points;
//! 2. new-element spans are closed;
//! 3. old-element openers are correlated with known element phrases;
//! 4. the remaining old-element spans are closed;
//! 5. the result is validated and rendered.

mod close;
mod correlate;
mod piece;
mod scan;

use serde::Serialize;

pub use piece::SpanKind;

use crate::markup::{strip_escapes, TERMINATOR};
use crate::{AnalysisContext, AnnotationError, PhraseTable};
use close::close_spans;
use piece::{render, rendered_len, window, Piece};
use scan::Scanner;

/// An element phrase located in a marked claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSpan {
    /// Phrase with surrounding whitespace trimmed.
    pub text: String,
    pub kind: SpanKind,
    /// Character offset in the marked text where the phrase begins.
    pub start_offset: usize,
}

/// A claim with its element spans marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedClaim {
    pub claim: u32,
    pub marked: String,
    pub new_elements: Vec<ElementSpan>,
    pub old_elements: Vec<ElementSpan>,
}

impl AnnotatedClaim {
    /// All spans ordered by position.
    pub fn spans(&self) -> Vec<&ElementSpan> {
        let mut spans: Vec<&ElementSpan> =
            self.new_elements.iter().chain(&self.old_elements).collect();
        spans.sort_by_key(|s| s.start_offset);
        spans
    }
}

/// Marks element spans in claim text.
#[derive(Debug, Clone)]
pub struct Annotator {
    scanner: Scanner,
    correlate: bool,
}

impl Annotator {
    pub fn new(table: &PhraseTable) -> Result<Self, regex::Error> {
        if !table.is_current() {
            tracing::warn!(
                version = table.version,
                "phrase table was written for a different table version"
            );
        }
        Ok(Self {
            scanner: Scanner::new(table)?,
            correlate: true,
        })
    }

    /// In manual marking mode old-element spans are only closed by the
    /// author's markup and punctuation, never by matching known elements.
    pub fn with_manual_marking(mut self, manual: bool) -> Self {
        self.correlate = !manual;
        self
    }

    /// Annotate one claim. `inherited` are the element phrases the claim
    /// receives from its parent chain.
    pub fn annotate<'a>(
        &self,
        claim: u32,
        text: &str,
        inherited: impl IntoIterator<Item = &'a str>,
        ctx: &mut AnalysisContext,
    ) -> Result<AnnotatedClaim, AnnotationError> {
        tracing::debug!(claim, "marking claim");

        let source = strip_escapes(text)?;
        let pieces = self.scanner.scan(source.trim());
        let pieces = close_spans(&pieces, SpanKind::New, true)?;
        let pieces = if self.correlate {
            correlate::correlate(claim, pieces, inherited, ctx)
        } else {
            pieces
        };
        let pieces = close_spans(&pieces, SpanKind::Old, false)?;
        validate(&pieces)?;

        let annotated = AnnotatedClaim {
            claim,
            marked: render(&pieces),
            new_elements: spans(&pieces, SpanKind::New),
            old_elements: spans(&pieces, SpanKind::Old),
        };
        debug_assert_eq!(
            annotated.new_elements.len() + annotated.old_elements.len(),
            pieces.iter().filter(|p| matches!(p, Piece::Open(..))).count(),
            "every validated opener yields one span"
        );
        tracing::trace!(claim, marked = annotated.marked.as_str(), "marked claim");
        Ok(annotated)
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(&PhraseTable::standard()).expect("Invalid standard phrase table")
    }
}

/// Check that the marked claim is well formed: no nesting of either kind,
/// every opener closed, and no `|` left over.
fn validate(pieces: &[Piece]) -> Result<(), AnnotationError> {
    let mut open: Option<SpanKind> = None;
    let mut opened = [0usize; 2];
    let mut closed = [0usize; 2];
    let slot = |kind: SpanKind| match kind {
        SpanKind::New => 0,
        SpanKind::Old => 1,
    };

    for (idx, piece) in pieces.iter().enumerate() {
        match *piece {
            Piece::Open(kind, _) => {
                opened[slot(kind)] += 1;
                if let Some(outer) = open {
                    return Err(AnnotationError::NestedSpan {
                        kind,
                        open: outer,
                        offset: rendered_len(&pieces[..idx]),
                        window: window(&pieces[..idx], &pieces[idx..]),
                    });
                }
                open = Some(kind);
            }
            Piece::Close(kind) => {
                closed[slot(kind)] += 1;
                if open != Some(kind) {
                    return Err(AnnotationError::UnmatchedClose {
                        kind,
                        offset: rendered_len(&pieces[..idx]),
                        window: window(&pieces[..idx], &pieces[idx..]),
                    });
                }
                open = None;
            }
            Piece::Text(TERMINATOR) => {
                return Err(AnnotationError::StrayTerminator {
                    offset: rendered_len(&pieces[..idx]),
                    window: window(&pieces[..idx], &pieces[idx..]),
                });
            }
            _ => {}
        }
    }

    for kind in [SpanKind::New, SpanKind::Old] {
        let (o, c) = (opened[slot(kind)], closed[slot(kind)]);
        if o != c {
            return Err(AnnotationError::Unbalanced {
                kind,
                opened: o,
                closed: c,
            });
        }
    }
    Ok(())
}

/// Extract the spans of `kind`. Spans must not nest.
fn spans(pieces: &[Piece], kind: SpanKind) -> Vec<ElementSpan> {
    let mut found = Vec::new();
    let mut offset = 0;
    let mut current: Option<(usize, String)> = None;

    for piece in pieces {
        match *piece {
            Piece::Open(k, _) if k == kind => current = Some((offset + 1, String::new())),
            Piece::Close(k) if k == kind => {
                if let Some((start, text)) = current.take() {
                    let leading = text.chars().take_while(|c| c.is_whitespace()).count();
                    found.push(ElementSpan {
                        text: text.trim().to_string(),
                        kind,
                        start_offset: start + leading,
                    });
                }
            }
            Piece::Text(ch) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push(ch);
                }
            }
            _ => {}
        }
        if piece.is_visible() {
            offset += 1;
        }
    }
    found
}
