//! Author markup recognised inside claim text.

use crate::AnnotationError;

/// Toggles an escape span; everything between two toggles is dropped.
pub const ESCAPE_TOGGLE: char = '`';
/// Suppresses automatic marking of the phrase that follows.
pub const COMMENT: char = '#';
/// Ends the open element span.
pub const TERMINATOR: char = '|';
/// Deletes itself and the preceding character.
pub const DELETE: char = '!';
/// After `,` `;` or `:`, keeps the open element span going.
pub const CONTINUE: char = '~';

const STRIPPED: [char; 7] = ['{', '}', '[', ']', COMMENT, TERMINATOR, DELETE];

/// Remove escape spans, toggles included.
pub fn strip_escapes(text: &str) -> Result<String, AnnotationError> {
    let mut out = String::with_capacity(text.len());
    let mut escaped = false;
    for ch in text.chars() {
        if ch == ESCAPE_TOGGLE {
            escaped = !escaped;
        } else if !escaped {
            out.push(ch);
        }
    }
    if escaped {
        return Err(AnnotationError::UnpairedEscape);
    }
    Ok(out)
}

/// Claim text with all markup removed, as used by the lints.
pub fn clean_claim_text(text: &str) -> Result<String, AnnotationError> {
    let stripped = strip_escapes(text)?;
    Ok(stripped
        .chars()
        .filter(|ch| !STRIPPED.contains(ch))
        .collect::<String>()
        .trim()
        .to_string())
}

/// Word character in the sense of a regex `\w`.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_spans_are_removed() {
        assert_eq!(
            strip_escapes("a widget`, the widget` and a gear").unwrap(),
            "a widget and a gear"
        );
        assert_eq!(
            strip_escapes("a `widget").unwrap_err(),
            AnnotationError::UnpairedEscape
        );
    }

    #[test]
    fn cleaning_drops_markers() {
        assert_eq!(
            clean_claim_text(" A {widget} comprising| the [frame]#. ").unwrap(),
            "A widget comprising the frame."
        );
    }
}
