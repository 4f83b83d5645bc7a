//! Diagnostics accumulated over an analysis run.

use std::fmt;

use serde::Serialize;

use crate::FatalError;

/// Whether a diagnostic counts against the claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A possible drafting defect.
    Warning,
    /// Informational output that never affects the run outcome.
    Note,
}

/// Category of a diagnostic, used for filtering and machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Style,
    Dependency,
    AntecedentBasis,
    ElementLint,
    ConflictingElements,
    DuplicateIntroduction,
    Rule,
    Ending,
    UseClaim,
    LeastRestrictive,
    Restriction,
    Disclosure,
    Definition,
    SpeciesElection,
    Title,
    Examiner,
    Cutoff,
}

/// A single finding about the claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Claim the finding is about, if it concerns one claim.
    pub claim: Option<u32>,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// Term worth searching for in prior art, collected into the search string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl Diagnostic {
    pub fn warning(claim: Option<u32>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            claim,
            kind,
            severity: Severity::Warning,
            message: message.into(),
            keyword: None,
        }
    }

    pub fn note(claim: Option<u32>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            claim,
            kind,
            severity: Severity::Note,
            message: message.into(),
            keyword: None,
        }
    }

    /// Attach a search keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Explicit accumulator threaded through every analysis stage.
///
/// Stages push [`Diagnostic`]s in the order they find them; since claims are
/// processed in ascending order the resulting sequence is deterministic.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    diagnostics: Vec<Diagnostic>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(claim = ?diagnostic.claim, kind = ?diagnostic.kind, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// Record a warning about `claim`.
    pub fn warn(&mut self, claim: u32, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Diagnostic::warning(Some(claim), kind, message));
    }

    /// Record an informational note not tied to a claim.
    pub fn note(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Diagnostic::note(None, kind, message));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Diagnostics about one claim, in emission order.
    pub fn for_claim(&self, claim: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.claim == Some(claim))
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No warnings survived filtering.
    Clean,
    /// This many warnings survived filtering.
    Warnings(usize),
    /// The input was structurally malformed.
    Aborted(FatalError),
}

impl RunOutcome {
    /// Outcome for a run that completed with `warnings` unsuppressed warnings.
    pub fn from_warning_count(warnings: usize) -> Self {
        if warnings == 0 {
            RunOutcome::Clean
        } else {
            RunOutcome::Warnings(warnings)
        }
    }

    /// Process exit code: 0 clean, 2 warnings, 1 aborted.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Clean => 0,
            RunOutcome::Warnings(_) => 2,
            RunOutcome::Aborted(_) => 1,
        }
    }
}
