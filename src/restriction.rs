//! Restriction analysis over independent claims.
//!
//! Independent claims are compared two at a time by the elements they
//! introduce. Three patterns suggest that an examiner could require the
//! applicant to elect between the claims:
//!
//! - no common elements: possibly unrelated inventions (MPEP 806.06);
//! - common and unique elements on both sides, same category: possibly
//!   combination and subcombination (MPEP 806.05(c));
//! - different categories sharing elements: possibly product and process
//!   (MPEP 806.05(e)-(i)).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::{AnalysisContext, ClaimType, Diagnostic, DiagnosticKind};

/// An independent claim prepared for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndependentClaim {
    pub number: u32,
    pub claim_type: ClaimType,
    /// New elements of the claim itself.
    pub elements: BTreeSet<String>,
    /// New elements of the claim and all of its dependents.
    pub group_elements: BTreeSet<String>,
}

/// Set algebra between two element sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementComparison {
    pub common: BTreeSet<String>,
    pub unique_first: BTreeSet<String>,
    pub unique_second: BTreeSet<String>,
}

impl ElementComparison {
    pub fn between(first: &BTreeSet<String>, second: &BTreeSet<String>) -> Self {
        Self {
            common: first.intersection(second).cloned().collect(),
            unique_first: first.difference(second).cloned().collect(),
            unique_second: second.difference(first).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionRule {
    Unrelated,
    CombinationSubcombination,
    ProductProcess,
}

impl RestrictionRule {
    pub fn mpep(self) -> &'static str {
        match self {
            RestrictionRule::Unrelated => "MPEP 806.06",
            RestrictionRule::CombinationSubcombination => "MPEP 806.05(c)",
            RestrictionRule::ProductProcess => "MPEP 806.05(e)-(i)",
        }
    }
}

impl fmt::Display for RestrictionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestrictionRule::Unrelated => f.write_str("unrelated inventions"),
            RestrictionRule::CombinationSubcombination => {
                f.write_str("combination and subcombination")
            }
            RestrictionRule::ProductProcess => f.write_str("product and process"),
        }
    }
}

/// Comparison of one pair of independent claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimPair {
    pub first: u32,
    pub second: u32,
    pub first_type: ClaimType,
    pub second_type: ClaimType,
    pub elements: ElementComparison,
    /// Present when the claim set has dependent claims.
    pub group_elements: Option<ElementComparison>,
    pub findings: Vec<RestrictionRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestrictionReport {
    pub pairs: Vec<ClaimPair>,
    /// Per independent claim, its own elements found in no other claim group.
    pub unique_elements: BTreeMap<u32, BTreeSet<String>>,
}

impl RestrictionReport {
    pub fn fired(&self, rule: RestrictionRule) -> bool {
        self.pairs.iter().any(|pair| pair.findings.contains(&rule))
    }

    pub fn finding_count(&self) -> usize {
        self.pairs.iter().map(|pair| pair.findings.len()).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RestrictionAnalyzer;

impl RestrictionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        claims: &[IndependentClaim],
        has_dependents: bool,
        ctx: &mut AnalysisContext,
    ) -> RestrictionReport {
        let mut report = RestrictionReport::default();

        if claims.len() == 1 {
            ctx.note(
                DiagnosticKind::Restriction,
                "Only one independent claim. A species election may be possible.",
            );
        }

        for (i, x) in claims.iter().enumerate() {
            for y in &claims[i + 1..] {
                let pair = self.compare(x, y, has_dependents);
                for rule in &pair.findings {
                    ctx.push(Diagnostic::warning(
                        Some(x.number),
                        DiagnosticKind::Restriction,
                        finding_message(&pair, *rule),
                    ));
                }
                report.pairs.push(pair);
            }
        }

        if claims.len() > 1 && report.finding_count() == 0 {
            ctx.note(
                DiagnosticKind::Restriction,
                "No restriction appears possible on the basis of claim elements alone. Restriction may still be possible for other reasons.",
            );
        }

        for x in claims {
            let others: BTreeSet<&String> = claims
                .iter()
                .filter(|y| y.number != x.number)
                .flat_map(|y| y.group_elements.iter())
                .collect();
            let unique = x
                .elements
                .iter()
                .filter(|e| !others.contains(e))
                .cloned()
                .collect();
            report.unique_elements.insert(x.number, unique);
        }

        report
    }

    fn compare(&self, x: &IndependentClaim, y: &IndependentClaim, has_dependents: bool) -> ClaimPair {
        let elements = ElementComparison::between(&x.elements, &y.elements);
        let same_type = x.claim_type == y.claim_type;
        let has_common = !elements.common.is_empty();
        let unique_x = !elements.unique_first.is_empty();
        let unique_y = !elements.unique_second.is_empty();

        let mut findings = Vec::new();
        if !has_common {
            findings.push(RestrictionRule::Unrelated);
        }
        if unique_x && unique_y && has_common && same_type {
            findings.push(RestrictionRule::CombinationSubcombination);
        }
        if !same_type && has_common && (unique_x || unique_y) {
            findings.push(RestrictionRule::ProductProcess);
        }
        tracing::debug!(first = x.number, second = y.number, ?findings, "compared claims");

        ClaimPair {
            first: x.number,
            second: y.number,
            first_type: x.claim_type,
            second_type: y.claim_type,
            group_elements: has_dependents
                .then(|| ElementComparison::between(&x.group_elements, &y.group_elements)),
            elements,
            findings,
        }
    }
}

fn finding_message(pair: &ClaimPair, rule: RestrictionRule) -> String {
    match rule {
        RestrictionRule::Unrelated => format!(
            "Claims {} and {} have no claim elements in common. Restriction as unrelated inventions may be possible. See {}.",
            pair.first,
            pair.second,
            rule.mpep()
        ),
        RestrictionRule::CombinationSubcombination => format!(
            "Claims {} and {} are both {} claims with common and unique claim elements. Restriction as combination and subcombination may be possible. See {}.",
            pair.first,
            pair.second,
            pair.first_type,
            rule.mpep()
        ),
        RestrictionRule::ProductProcess => format!(
            "Claims {} ({}) and {} ({}) share claim elements. Restriction as product and process may be possible. See {}.",
            pair.first,
            pair.first_type,
            pair.second,
            pair.second_type,
            rule.mpep()
        ),
    }
}
