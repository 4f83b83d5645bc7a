use std::fmt;

use serde::Serialize;

/// Which kind of element a span marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// An element introduced by the claim, marked `{…}`.
    New,
    /// A reference back to an introduced element, marked `[…]`.
    Old,
}

impl SpanKind {
    pub fn open_char(self) -> char {
        match self {
            SpanKind::New => '{',
            SpanKind::Old => '[',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            SpanKind::New => '}',
            SpanKind::Old => ']',
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanKind::New => f.write_str("new-element"),
            SpanKind::Old => f.write_str("old-element"),
        }
    }
}

/// Who placed an opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkSource {
    /// Typed by the author.
    Explicit,
    /// Placed by article or quantifier marking.
    Auto,
    /// An automatic old-element opener matched to a known element.
    Correlated,
}

/// One unit of a claim being marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece {
    Text(char),
    Open(SpanKind, MarkSource),
    Close(SpanKind),
    /// Zero-width point at which an automatically opened span ends.
    Boundary,
}

impl Piece {
    pub(crate) fn from_source(ch: char) -> Piece {
        match ch {
            '{' => Piece::Open(SpanKind::New, MarkSource::Explicit),
            '[' => Piece::Open(SpanKind::Old, MarkSource::Explicit),
            '}' => Piece::Close(SpanKind::New),
            ']' => Piece::Close(SpanKind::Old),
            other => Piece::Text(other),
        }
    }

    /// The character this piece renders as, if any.
    pub(crate) fn rendered(self) -> Option<char> {
        match self {
            Piece::Text(ch) => Some(ch),
            Piece::Open(kind, _) => Some(kind.open_char()),
            Piece::Close(kind) => Some(kind.close_char()),
            Piece::Boundary => None,
        }
    }

    pub(crate) fn is_visible(self) -> bool {
        self != Piece::Boundary
    }
}

pub(crate) fn render(pieces: &[Piece]) -> String {
    pieces.iter().filter_map(|p| p.rendered()).collect()
}

/// Number of characters `pieces` render as.
pub(crate) fn rendered_len(pieces: &[Piece]) -> usize {
    pieces.iter().filter(|p| p.is_visible()).count()
}

const WINDOW: usize = 20;

/// Text surrounding an error: the tail of what was already produced and the
/// head of what remains.
pub(crate) fn window(done: &[Piece], rest: &[Piece]) -> String {
    let before: Vec<char> = done.iter().filter_map(|p| p.rendered()).collect();
    let start = before.len().saturating_sub(WINDOW);
    let mut text: String = before[start..].iter().collect();
    text.extend(rest.iter().filter_map(|p| p.rendered()).take(WINDOW));
    text
}
