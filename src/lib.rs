#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Patent claim analysis: element marking, antecedent basis and restriction.
//!
//! Claims arrive as ordered `(number, text)` pairs and flow through a fixed
//! sequence of stages:
//!
//! - [`ClaimRecordBuilder`] - numbering checks, dependency and claim type
//! - [`Annotator`] - marks new elements `{…}` and back-references `[…]`
//! - [`DependencyResolver`] - parent links and inherited elements
//! - [`AntecedentChecker`] - every reference must follow an introduction
//! - [`RestrictionAnalyzer`] - pairwise comparison of independent claims
//!
//! [`ClaimAnalyzer`] runs them in order. Findings are collected as
//! [`Diagnostic`]s in an [`AnalysisContext`]; only structurally broken input
//! stops a run, with a [`FatalError`].
//!
//! ## Marking
//!
//! Elements are found lexically. "a"/"an" and plural quantifiers open a new
//! element, "the"/"said" open a reference, and spans end at punctuation or
//! before a boundary phrase such as "comprising" or "coupled" (see
//! [`PhraseTable`]). Authors can steer the marking inline:
//!
//! ```text
//! A contraption} comprising: a nut,~ bolt| and #a lot of `a spring` the [spring].
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use layered_claims::{AnalysisConfig, AnalysisContext, ClaimAnalyzer};
//!
//! let analyzer = ClaimAnalyzer::new(AnalysisConfig::nitpick())?;
//! let mut ctx = AnalysisContext::new();
//! analyzer.analyze(vec![(1, "A widget comprising a frame.")], &mut ctx)?;
//! ```

mod annotate;
mod antecedent;
mod config;
mod context;
mod dependency;
mod disclosure;
mod display;
mod error;
mod lint;
mod markup;
mod phrase_table;
mod pipeline;
mod record;
mod restriction;

pub use annotate::{AnnotatedClaim, Annotator, ElementSpan, SpanKind};
pub use antecedent::{AntecedentChecker, ClaimElements, DEFAULT_MAX_ELEMENT_LEN};
pub use config::AnalysisConfig;
pub use context::{AnalysisContext, Diagnostic, DiagnosticKind, RunOutcome, Severity};
pub use dependency::{ClaimElementMap, DependencyGraph, DependencyResolver, IntroducedAt};
pub use disclosure::{check_disclosure, WEAK_DISCLOSURE_COUNT};
pub use display::MarkedClaimDisplay;
pub use error::{AnalysisResult, AnnotationError, FatalError};
pub use lint::{
    check_claim_counts, check_fewest_elements, check_least_restrictive, check_style,
    check_use_claim, EndingsChecker, Rule, RuleSet, ATTRIBUTE_DEPENDENT_CLAIMS,
    ATTRIBUTE_INDEPENDENT_CLAIMS,
};
pub use markup::{clean_claim_text, strip_escapes};
pub use phrase_table::{PhraseTable, PHRASE_TABLE_VERSION};
pub use pipeline::{Analysis, ClaimAnalyzer};
pub use record::{build_records, ClaimRecord, ClaimRecordBuilder, ClaimType};
pub use restriction::{
    ClaimPair, ElementComparison, IndependentClaim, RestrictionAnalyzer, RestrictionReport,
    RestrictionRule,
};

#[cfg(test)]
mod tests {
    mod annotate;
    mod antecedent;
    mod pipeline;
    mod record;
    mod restriction;
}
