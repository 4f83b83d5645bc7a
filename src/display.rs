use std::fmt::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::{AnnotatedClaim, SpanKind};

/// Renders a marked claim with each element span underlined.
///
/// ```text
/// A {widget} comprising a {frame}.
///    ╰────╯ new
///                          ╰───╯ new
/// ```
pub struct MarkedClaimDisplay<'a> {
    claim: &'a AnnotatedClaim,
    include_old: bool,
}

impl<'a> MarkedClaimDisplay<'a> {
    pub fn new(claim: &'a AnnotatedClaim) -> Self {
        Self {
            claim,
            include_old: true,
        }
    }

    /// Underline introductions only.
    pub fn new_elements_only(mut self) -> Self {
        self.include_old = false;
        self
    }
}

impl<'a> fmt::Display for MarkedClaimDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marked = &self.claim.marked;
        f.write_str(marked)?;

        for span in self.claim.spans() {
            if span.kind == SpanKind::Old && !self.include_old {
                continue;
            }
            let prefix: String = marked.chars().take(span.start_offset).collect();
            let start = UnicodeWidthStr::width(prefix.as_str());
            let width = UnicodeWidthStr::width(span.text.as_str());

            f.write_char('\n')?;
            for _ in 0..start {
                f.write_char(' ')?;
            }
            f.write_char('╰')?;
            for _ in 1..width.saturating_sub(1) {
                f.write_char('─')?;
            }
            if width > 1 {
                f.write_char('╯')?;
            }
            match span.kind {
                SpanKind::New => f.write_str(" new")?,
                SpanKind::Old => f.write_str(" old")?,
            }
        }
        Ok(())
    }
}
