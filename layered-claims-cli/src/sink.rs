//! Where diagnostics end up: filtering, counting and writing.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{self, Write};

use layered_claims::{Diagnostic, RestrictionReport};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::CliError;

/// Receives every diagnostic of a run.
///
/// Warnings matching a filter are hidden. They are neither counted nor do
/// they contribute keywords to the search string. Notes are always shown.
pub(crate) struct DiagnosticSink<W: Write> {
    out: W,
    filters: Vec<Regex>,
    json: bool,
    shown: Vec<Diagnostic>,
    warnings: usize,
    suppressed: usize,
    keywords: BTreeSet<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    warnings: usize,
    suppressed: usize,
    search_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    restriction: Option<&'a RestrictionReport>,
}

impl<W: Write> DiagnosticSink<W> {
    pub fn new(out: W, filters: &[String], json: bool) -> Result<Self, CliError> {
        let filters = filters
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| CliError::Filter {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            out,
            filters,
            json,
            shown: Vec::new(),
            warnings: 0,
            suppressed: 0,
            keywords: BTreeSet::new(),
        })
    }

    fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        diagnostic.is_warning() && self.filters.iter().any(|f| f.is_match(&diagnostic.message))
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        if self.is_suppressed(diagnostic) {
            self.suppressed += 1;
            return Ok(());
        }
        if diagnostic.is_warning() {
            self.warnings += 1;
            if let Some(keyword) = &diagnostic.keyword {
                self.keywords.insert(keyword.clone());
            }
        }
        if self.json {
            self.shown.push(diagnostic.clone());
            Ok(())
        } else {
            writeln!(self.out, "{}", diagnostic)
        }
    }

    pub fn emit_all(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        diagnostics.iter().try_for_each(|d| self.emit(d))
    }

    /// Informational text, left out of JSON output.
    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        writeln!(self.out, "{}", text)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// Keywords of the shown warnings, quoted when they contain spaces.
    pub fn search_string(&self) -> String {
        self.keywords
            .iter()
            .map(|k| {
                if k.contains(' ') {
                    format!("\"{}\"", k)
                } else {
                    k.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flush output, writing the JSON report in JSON mode. Returns the
    /// number of shown warnings.
    pub fn finish(mut self, restriction: Option<&RestrictionReport>) -> io::Result<usize> {
        if self.json {
            let report = JsonReport {
                diagnostics: &self.shown,
                warnings: self.warnings,
                suppressed: self.suppressed,
                search_string: self.search_string(),
                restriction,
            };
            serde_json::to_writer_pretty(&mut self.out, &report)?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_claims::DiagnosticKind;

    fn diagnostics() -> Vec<Diagnostic> {
        vec![
            Diagnostic::warning(Some(1), DiagnosticKind::AntecedentBasis, "Claim 1 recites \"lever\", which possibly lacks antecedent basis.")
                .with_keyword("lever"),
            Diagnostic::warning(Some(2), DiagnosticKind::Ending, "Claim 2 recites \"quickly\", a possible adverb."),
            Diagnostic::warning(Some(2), DiagnosticKind::Disclosure, "Claim 2 element \"drive shaft\" does not appear in the spec.")
                .with_keyword("drive shaft"),
            Diagnostic::note(None, DiagnosticKind::Restriction, "Only one independent claim. A species election may be possible."),
        ]
    }

    #[test]
    fn filters_hide_and_uncount() {
        let mut out = Vec::new();
        let mut sink = DiagnosticSink::new(&mut out, &["ADVERB".to_string(), "species".to_string()], false).unwrap();
        sink.emit_all(&diagnostics()).unwrap();

        assert_eq!(sink.warning_count(), 2);
        assert_eq!(sink.search_string(), "\"drive shaft\" lever");
        assert_eq!(sink.finish(None).unwrap(), 2);

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("adverb"));
        assert!(text.contains("species election"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn suppressed_keywords_are_dropped() {
        let mut sink = DiagnosticSink::new(Vec::new(), &["lever".to_string()], false).unwrap();
        sink.emit_all(&diagnostics()).unwrap();
        assert_eq!(sink.search_string(), "\"drive shaft\"");
    }

    #[test]
    fn json_report() {
        let mut out = Vec::new();
        let mut sink = DiagnosticSink::new(&mut out, &[], true).unwrap();
        sink.emit_all(&diagnostics()).unwrap();
        sink.line("not in the report").unwrap();
        sink.finish(None).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["warnings"], 3);
        assert_eq!(value["diagnostics"].as_array().unwrap().len(), 4);
        assert_eq!(value["diagnostics"][0]["kind"], "antecedent_basis");
        assert_eq!(value["diagnostics"][3]["severity"], "note");
        assert!(value.get("restriction").is_none());
    }

    #[test]
    fn invalid_filter() {
        let err = DiagnosticSink::new(Vec::new(), &["(".to_string()], false).err().unwrap();
        assert!(matches!(err, CliError::Filter { .. }));
    }
}
