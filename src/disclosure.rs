//! Cross-checking claim elements against the specification text.

use std::collections::{BTreeMap, BTreeSet};

use crate::{AnalysisContext, ClaimElements, Diagnostic, DiagnosticKind};

/// Mentions at or below this count are reported as weak disclosure.
pub const WEAK_DISCLOSURE_COUNT: usize = 2;

/// Count literal occurrences of every element in `spec_text`, reporting each
/// element once, for the claim that introduces it.
pub fn check_disclosure(
    spec_text: &str,
    elements: &BTreeMap<u32, ClaimElements>,
    ctx: &mut AnalysisContext,
) {
    let mut reported = BTreeSet::new();
    for (&claim, claim_elements) in elements {
        for element in claim_elements.own.phrases() {
            if !reported.insert(element) {
                continue;
            }
            let count = spec_text.matches(element).count();
            let message = match count {
                0 => format!(
                    "Claim {} element \"{}\" does not appear in the spec.",
                    claim, element
                ),
                c if c <= WEAK_DISCLOSURE_COUNT => format!(
                    "Claim {} element \"{}\" appears in the spec only {} time(s), which is possibly a weak disclosure.",
                    claim, element, c
                ),
                _ => continue,
            };
            ctx.push(
                Diagnostic::warning(Some(claim), DiagnosticKind::Disclosure, message)
                    .with_keyword(element),
            );
        }
    }
}
