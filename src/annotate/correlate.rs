//! Matching old-element openers against known element phrases.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use super::piece::{MarkSource, Piece, SpanKind};
use super::spans;
use crate::markup::TERMINATOR;
use crate::{AnalysisContext, DiagnosticKind};

enum Ending {
    /// The author already closed the span right after the phrase.
    Closed,
    /// A `|` right after the phrase becomes the closer.
    Terminator(usize),
    Insert(usize),
}

/// Index just past `phrase` if it follows the opener at `opener`.
fn match_phrase(pieces: &[Piece], opener: usize, phrase: &[char]) -> Option<usize> {
    let mut idx = opener + 1;
    for &expected in phrase {
        loop {
            match pieces.get(idx) {
                Some(Piece::Boundary) => idx += 1,
                Some(Piece::Text(ch)) if *ch == expected => {
                    idx += 1;
                    break;
                }
                _ => return None,
            }
        }
    }
    Some(idx)
}

fn ending_at(pieces: &[Piece], idx: usize) -> Ending {
    match pieces.get(idx) {
        Some(Piece::Close(SpanKind::Old)) => Ending::Closed,
        Some(Piece::Text(TERMINATOR)) => Ending::Terminator(idx),
        _ => Ending::Insert(idx),
    }
}

/// Close old-element spans right after the known element they refer to.
///
/// Phrases are tried longest first; an opener matched by one phrase is not
/// available to shorter ones.
pub(crate) fn correlate<'a>(
    claim: u32,
    pieces: Vec<Piece>,
    inherited: impl IntoIterator<Item = &'a str>,
    ctx: &mut AnalysisContext,
) -> Vec<Piece> {
    let mut phrases: BTreeSet<String> = spans(&pieces, SpanKind::New)
        .into_iter()
        .map(|span| span.text)
        .collect();
    phrases.extend(inherited.into_iter().map(str::to_string));
    phrases.remove("");

    let mut ordered: Vec<String> = phrases.into_iter().collect();
    ordered.sort_by(|a, b| {
        Reverse(a.chars().count())
            .cmp(&Reverse(b.chars().count()))
            .then_with(|| a.cmp(b))
    });

    let mut guarded = vec![false; pieces.len()];
    let mut closers: BTreeSet<usize> = BTreeSet::new();
    let mut terminators: BTreeSet<usize> = BTreeSet::new();
    let mut matched: Vec<&str> = Vec::new();

    for phrase in &ordered {
        let chars: Vec<char> = phrase.chars().collect();
        let mut hits = 0;
        for opener in 0..pieces.len() {
            if guarded[opener] || !matches!(pieces[opener], Piece::Open(SpanKind::Old, _)) {
                continue;
            }
            let end = match match_phrase(&pieces, opener, &chars) {
                Some(end) => end,
                None => continue,
            };
            guarded[opener] = true;
            hits += 1;
            match ending_at(&pieces, end) {
                Ending::Closed => {}
                Ending::Terminator(idx) => {
                    terminators.insert(idx);
                }
                Ending::Insert(idx) => {
                    closers.insert(idx);
                }
            }
        }
        if hits == 0 {
            continue;
        }
        tracing::trace!(claim, phrase = phrase.as_str(), hits, "correlated element");
        for longer in matched.iter().filter(|m| m.starts_with(phrase.as_str())) {
            ctx.warn(
                claim,
                DiagnosticKind::ConflictingElements,
                format!(
                    "Claim {} has possibly conflicting claim elements \"{}\" and \"{}\". Check the marked claim.",
                    claim, phrase, longer
                ),
            );
        }
        matched.push(phrase);
    }

    let len = pieces.len();
    let mut out = Vec::with_capacity(len + closers.len());
    for (idx, piece) in pieces.into_iter().enumerate() {
        if closers.contains(&idx) {
            out.push(Piece::Close(SpanKind::Old));
        }
        if terminators.contains(&idx) {
            out.push(Piece::Close(SpanKind::Old));
        } else if guarded[idx] {
            out.push(Piece::Open(SpanKind::Old, MarkSource::Correlated));
        } else {
            out.push(piece);
        }
    }
    if closers.contains(&len) {
        out.push(Piece::Close(SpanKind::Old));
    }
    out
}
