//! Closing passes: decide where each open element span ends.

use super::piece::{rendered_len, window, MarkSource, Piece, SpanKind};
use crate::markup::{CONTINUE, DELETE, TERMINATOR};
use crate::AnnotationError;

/// Close every span of `kind` in `pieces`.
///
/// `directives` enables the one-shot author directives (`~` after
/// punctuation and `!`), which are consumed by the first pass that sees them.
pub(crate) fn close_spans(
    pieces: &[Piece],
    kind: SpanKind,
    directives: bool,
) -> Result<Vec<Piece>, AnnotationError> {
    let mut out: Vec<Piece> = Vec::with_capacity(pieces.len() + 8);
    let mut open: Option<MarkSource> = None;
    let mut i = 0;

    while i < pieces.len() {
        let piece = pieces[i];
        match piece {
            Piece::Boundary => {
                if open == Some(MarkSource::Auto) {
                    out.push(Piece::Close(kind));
                    open = None;
                }
                out.push(piece);
            }
            Piece::Text(',') | Piece::Text(';') | Piece::Text(':') => {
                if directives && pieces.get(i + 1) == Some(&Piece::Text(CONTINUE)) {
                    out.push(piece);
                    i += 2;
                    continue;
                }
                match open {
                    // Correlation already placed the closer after the known phrase.
                    Some(MarkSource::Correlated) => {}
                    Some(_) => {
                        out.push(Piece::Close(kind));
                        open = None;
                    }
                    None => {}
                }
                out.push(piece);
            }
            Piece::Text(TERMINATOR) => {
                if open.take().is_some() {
                    out.push(Piece::Close(kind));
                } else {
                    out.push(piece);
                }
            }
            Piece::Text(DELETE) if directives => delete_previous(&mut out, kind, &mut open),
            Piece::Open(k, source) => match open {
                None if k == kind => {
                    open = Some(source);
                    out.push(piece);
                }
                None => out.push(piece),
                Some(MarkSource::Auto) => {
                    if k == kind {
                        // Nothing marked a boundary here; end the automatic span.
                        out.push(Piece::Close(kind));
                        open = Some(source);
                    }
                    out.push(piece);
                }
                Some(_) if source == MarkSource::Auto && (k == kind || directives) => {
                    tracing::trace!(?k, "dropping automatic opener inside an explicit span");
                }
                Some(_) if k == kind || source == MarkSource::Explicit => {
                    return Err(AnnotationError::NestedSpan {
                        kind: k,
                        open: kind,
                        offset: rendered_len(&out),
                        window: window(&out, &pieces[i..]),
                    });
                }
                Some(_) => out.push(piece),
            },
            Piece::Close(k) if k == kind => {
                if open.take().is_none() {
                    return Err(AnnotationError::UnmatchedClose {
                        kind,
                        offset: rendered_len(&out),
                        window: window(&out, &pieces[i..]),
                    });
                }
                out.push(piece);
            }
            _ => out.push(piece),
        }
        i += 1;
    }

    if open.is_some() {
        let last_visible = out.iter().rposition(|p| p.is_visible());
        match last_visible {
            Some(idx) if out[idx] == Piece::Text('.') => out.insert(idx, Piece::Close(kind)),
            _ => out.push(Piece::Close(kind)),
        }
    }

    Ok(out)
}

/// Apply `!`: remove the last visible piece produced so far.
fn delete_previous(out: &mut Vec<Piece>, kind: SpanKind, open: &mut Option<MarkSource>) {
    let idx = match out.iter().rposition(|p| p.is_visible()) {
        Some(idx) => idx,
        None => return,
    };
    match out.remove(idx) {
        Piece::Open(k, _) if k == kind => *open = None,
        Piece::Close(k) if k == kind => *open = Some(MarkSource::Explicit),
        _ => {}
    }
}
