//! Scans over the specification (description) text.

use std::fs;
use std::path::Path;

use layered_claims::{AnalysisContext, Diagnostic, DiagnosticKind};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{DocumentError, DocumentResult};

// Phrases that often introduce a lexicographic definition.
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)(?:“|”|\bi\.e\.|, that is\b|\bmeaning\b|\bmeans\b|\bdefinitions?\b|\bdefines?\b",
        r"|\bdefined\b|\bdefining\b|\bterms?\b|\btermed\b|\bterminology\b|\bphrases?\b",
        r"|\bin other words\b|\bknown as\b|\bcalled\b|\bnamed\b|\bso.called\b|\bsimply put\b",
        r"|\bput differently\b|\bthat is to say\b|\bnamely\b|\botherwise stated\b|\bin short\b",
        r"|\balternatively stated\b|\bput it differently\b|\bidentified\b|\breferred to as\b",
        r"|\bdesignated\b|\bas used herein\b|\bas used here\b|\bas opposed to\b",
        r"|\bis understood to mean\b|\bis understood herein\b|\bconstrued\b)"
    ))
    .expect("Invalid definition regex")
});
static DRAWINGS_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:DRAWINGS|FIGURES)\b").expect("Invalid drawings heading regex"));
static ALTERNATIVE_FIGURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:fig\.|figure) \d.*\b(?:alternative|alternate|another|further|optional)\b")
        .expect("Invalid species regex")
});
static NTH_EMBODIMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:fig\.|figure) \d.*\b(?:second|third|fourth|fifth|sixth) embodiment\b")
        .expect("Invalid species regex")
});

/// The specification, kept line by line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specification {
    lines: Vec<String>,
}

impl Specification {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(|line| line.trim().to_string()).collect(),
        }
    }

    pub fn load(path: &Path) -> DocumentResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| DocumentError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::parse(&content))
    }

    /// All lines joined by single spaces. Headings get a period so they do
    /// not run into the following sentence.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            let line = collapse_spaces(line);
            if line.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&line);
            if is_heading(&line) {
                text.push('.');
            }
        }
        text
    }

    /// Sentences, split naively at ". ".
    pub fn sentences(&self) -> Vec<String> {
        self.text()
            .split(". ")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Flag sentences that possibly define a term, with the trigger phrase
    /// highlighted. Returns how many were flagged.
    pub fn check_definitions(&self, ctx: &mut AnalysisContext) -> usize {
        let mut flagged = 0;
        for sentence in self.sentences() {
            let Some(m) = definition_trigger(&sentence) else {
                continue;
            };
            let highlighted = format!(
                "{}*****{}*****{}",
                &sentence[..m.0],
                &sentence[m.0..m.1],
                &sentence[m.1..]
            );
            ctx.push(Diagnostic::warning(
                None,
                DiagnosticKind::Definition,
                format!("Spec. quote with possible lexicographic definition: {}.", highlighted),
            ));
            flagged += 1;
        }
        flagged
    }

    /// Flag figure descriptions in drawings sections that suggest
    /// alternative embodiments. Returns how many were flagged.
    pub fn check_species_elections(&self, ctx: &mut AnalysisContext) -> usize {
        let mut flagged = 0;
        let mut in_drawings = false;
        for line in &self.lines {
            if is_heading(line) {
                in_drawings = DRAWINGS_HEADING.is_match(line);
                tracing::debug!(heading = line.as_str(), in_drawings, "specification section");
                continue;
            }
            if in_drawings && (ALTERNATIVE_FIGURE.is_match(line) || NTH_EMBODIMENT.is_match(line)) {
                ctx.push(Diagnostic::warning(
                    None,
                    DiagnosticKind::SpeciesElection,
                    format!("Possible species election: {}", line),
                ));
                flagged += 1;
            }
        }
        if flagged == 0 {
            ctx.note(
                DiagnosticKind::SpeciesElection,
                "No possible species elections detected. These can usually be found by looking at the figures.",
            );
        }
        flagged
    }
}

/// Byte range of the first definition trigger. "means for" and "means to"
/// are claim language, not definitions.
fn definition_trigger(sentence: &str) -> Option<(usize, usize)> {
    DEFINITION
        .find_iter(sentence)
        .find(|m| {
            if !m.as_str().eq_ignore_ascii_case("means") {
                return true;
            }
            let rest = sentence[m.end()..].to_lowercase();
            !(rest.starts_with(" for") || rest.starts_with(" to"))
        })
        .map(|m| (m.start(), m.end()))
}

fn is_heading(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

fn collapse_spaces(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = "TITLE OF THE INVENTION
Fastening system

BRIEF DESCRIPTION OF THE DRAWINGS
FIG. 1 is a perspective view of a fastening system.
FIG. 2 is a side view of another fastening system.
FIG. 3 shows a second embodiment of the lever.

DETAILED DESCRIPTION
FIG. 4 shows a further lever.
As used herein, a frame is any rigid member. The motor is coupled to the frame.
The lever includes means for turning.
";

    #[test]
    fn flattening_marks_headings() {
        let spec = Specification::parse("BACKGROUND\nA   widget\nis known.\n");
        assert_eq!(spec.text(), "BACKGROUND. A widget is known.");
        assert_eq!(spec.sentences(), vec!["BACKGROUND", "A widget is known."]);
    }

    #[test]
    fn definitions() {
        let mut ctx = AnalysisContext::new();
        let flagged = Specification::parse(SPEC).check_definitions(&mut ctx);

        assert_eq!(flagged, 1);
        insta::assert_snapshot!(&ctx.diagnostics()[0], @"Spec. quote with possible lexicographic definition: *****As used herein*****, a frame is any rigid member.");
    }

    #[test]
    fn species_elections() {
        let mut ctx = AnalysisContext::new();
        let flagged = Specification::parse(SPEC).check_species_elections(&mut ctx);

        assert_eq!(flagged, 2);
        let messages: Vec<&str> = ctx.diagnostics().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Possible species election: FIG. 2 is a side view of another fastening system.",
                "Possible species election: FIG. 3 shows a second embodiment of the lever.",
            ]
        );
    }

    #[test]
    fn no_species_elections_is_a_note() {
        let mut ctx = AnalysisContext::new();
        Specification::parse("DRAWINGS\nFIG. 1 is a view.\n").check_species_elections(&mut ctx);
        assert_eq!(ctx.warning_count(), 0);
        assert_eq!(ctx.diagnostics().len(), 1);
    }
}
