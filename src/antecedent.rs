//! Antecedent basis: every reference must follow an introduction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    AnalysisContext, AnnotatedClaim, ClaimElementMap, Diagnostic, DiagnosticKind, IntroducedAt,
};

/// Default limit on the length of an element phrase.
pub const DEFAULT_MAX_ELEMENT_LEN: usize = 100;

/// Terms that never belong inside an element phrase. Finding one usually
/// means a span was not closed where it should have been.
static DISALLOWED_TERMS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        "claim",
        "comprising",
        "comprises",
        "consisting of",
        "consisting essentially of",
        "wherein",
        "whereby",
    ]
    .iter()
    .map(|term| {
        let pattern = format!(r"(?i)\b{}\b", term.replace(' ', r"\s+"));
        (*term, Regex::new(&pattern).expect("Invalid disallowed term regex"))
    })
    .collect()
});

/// Element knowledge of one checked claim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimElements {
    /// Elements introduced in the claim's own text.
    pub own: ClaimElementMap,
    /// Own elements plus everything inherited.
    pub effective: ClaimElementMap,
}

#[derive(Debug, Clone)]
pub struct AntecedentChecker {
    max_element_len: usize,
}

impl AntecedentChecker {
    pub fn new() -> Self {
        Self {
            max_element_len: DEFAULT_MAX_ELEMENT_LEN,
        }
    }

    pub fn with_max_element_len(mut self, max_element_len: usize) -> Self {
        self.max_element_len = max_element_len;
        self
    }

    pub fn check(
        &self,
        annotated: &AnnotatedClaim,
        inherited: ClaimElementMap,
        ctx: &mut AnalysisContext,
    ) -> ClaimElements {
        let claim = annotated.claim;
        let mut own = ClaimElementMap::new();
        let mut effective = inherited;

        for span in &annotated.new_elements {
            self.lint_element(claim, &span.text, ctx);
            if span.text.is_empty() {
                continue;
            }
            let at = IntroducedAt::Offset(span.start_offset);
            if effective.introduce(&span.text, at) {
                own.introduce(&span.text, at);
            } else {
                ctx.push(
                    Diagnostic::warning(
                        Some(claim),
                        DiagnosticKind::DuplicateIntroduction,
                        format!("Claim {} introduces \"{}\" more than once.", claim, span.text),
                    )
                    .with_keyword(span.text.as_str()),
                );
            }
        }

        for span in &annotated.old_elements {
            let supported = effective
                .get(&span.text)
                .map_or(false, |at| at < IntroducedAt::Offset(span.start_offset));
            if !supported {
                ctx.push(
                    Diagnostic::warning(
                        Some(claim),
                        DiagnosticKind::AntecedentBasis,
                        format!(
                            "Claim {} recites \"{}\", which possibly lacks antecedent basis.",
                            claim, span.text
                        ),
                    )
                    .with_keyword(span.text.as_str()),
                );
            }
        }

        ClaimElements { own, effective }
    }

    fn lint_element(&self, claim: u32, element: &str, ctx: &mut AnalysisContext) {
        if element.is_empty() {
            ctx.warn(
                claim,
                DiagnosticKind::ElementLint,
                format!("Claim {} has an empty claim element.", claim),
            );
            return;
        }
        if element.chars().count() >= self.max_element_len {
            ctx.warn(
                claim,
                DiagnosticKind::ElementLint,
                format!(
                    "Claim {} has a claim element of {} or more characters, which possibly indicates a marking error: \"{}\".",
                    claim, self.max_element_len, element
                ),
            );
        }
        for (term, regex) in DISALLOWED_TERMS.iter() {
            if regex.is_match(element) {
                ctx.warn(
                    claim,
                    DiagnosticKind::ElementLint,
                    format!(
                        "Claim {} has a claim element containing \"{}\", which possibly indicates a marking error: \"{}\".",
                        claim, term, element
                    ),
                );
            }
        }
    }
}

impl Default for AntecedentChecker {
    fn default() -> Self {
        Self::new()
    }
}
