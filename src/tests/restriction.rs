use std::collections::BTreeSet;

use crate::{
    AnalysisContext, ClaimType, DiagnosticKind, IndependentClaim, RestrictionAnalyzer,
    RestrictionRule, Severity,
};

fn set(elements: &[&str]) -> BTreeSet<String> {
    elements.iter().map(|e| e.to_string()).collect()
}

fn claim(number: u32, claim_type: ClaimType, elements: &[&str], group: &[&str]) -> IndependentClaim {
    IndependentClaim {
        number,
        claim_type,
        elements: set(elements),
        group_elements: set(group),
    }
}

#[test]
fn test_rules() {
    let cases = [
        (
            ClaimType::Apparatus,
            &["fastening system", "frame", "motor"][..],
            ClaimType::Apparatus,
            &["fastening system", "frame", "lever"][..],
            vec![RestrictionRule::CombinationSubcombination],
        ),
        (
            ClaimType::Apparatus,
            &["widget", "frame"][..],
            ClaimType::Method,
            &["process", "solution"][..],
            vec![RestrictionRule::Unrelated],
        ),
        (
            ClaimType::Apparatus,
            &["widget", "frame"][..],
            ClaimType::Method,
            &["widget", "solution"][..],
            vec![RestrictionRule::ProductProcess],
        ),
        // One claim's elements contain the other's.
        (
            ClaimType::Apparatus,
            &["widget", "frame"][..],
            ClaimType::Apparatus,
            &["widget", "frame", "gear"][..],
            vec![],
        ),
        (
            ClaimType::Apparatus,
            &["widget"][..],
            ClaimType::Method,
            &["widget"][..],
            vec![],
        ),
    ];

    for (first_type, first, second_type, second, expected) in cases {
        let mut ctx = AnalysisContext::new();
        let report = RestrictionAnalyzer::new().analyze(
            &[
                claim(1, first_type, first, first),
                claim(2, second_type, second, second),
            ],
            false,
            &mut ctx,
        );
        assert_eq!(report.pairs[0].findings, expected, "{:?} / {:?}", first, second);
        assert_eq!(ctx.warning_count(), expected.len());
    }
}

#[test]
fn test_single_independent_claim() {
    let mut ctx = AnalysisContext::new();
    let report = RestrictionAnalyzer::new().analyze(
        &[claim(1, ClaimType::Apparatus, &["widget"], &["widget", "gear"])],
        true,
        &mut ctx,
    );

    assert!(report.pairs.is_empty());
    let d = &ctx.diagnostics()[0];
    assert_eq!(d.severity, Severity::Note);
    assert_eq!(d.kind, DiagnosticKind::Restriction);
    assert_eq!(
        d.message,
        "Only one independent claim. A species election may be possible."
    );
}

#[test]
fn test_no_restriction_note() {
    let mut ctx = AnalysisContext::new();
    RestrictionAnalyzer::new().analyze(
        &[
            claim(1, ClaimType::Apparatus, &["widget"], &["widget"]),
            claim(2, ClaimType::Apparatus, &["widget"], &["widget"]),
        ],
        false,
        &mut ctx,
    );
    assert_eq!(ctx.warning_count(), 0);
    assert!(ctx.diagnostics()[0]
        .message
        .starts_with("No restriction appears possible"));
}

#[test]
fn test_group_elements() {
    let mut ctx = AnalysisContext::new();
    let report = RestrictionAnalyzer::new().analyze(
        &[
            claim(1, ClaimType::Apparatus, &["widget", "frame"], &["widget", "frame", "spring"]),
            claim(4, ClaimType::Method, &["method", "widget"], &["method", "widget", "spring", "oven"]),
            claim(7, ClaimType::Apparatus, &["gadget"], &["gadget", "frame"]),
        ],
        true,
        &mut ctx,
    );

    assert_eq!(report.pairs.len(), 3);
    let groups = report.pairs[0].group_elements.as_ref().unwrap();
    assert_eq!(groups.common, set(&["spring", "widget"]));
    assert_eq!(groups.unique_second, set(&["method", "oven"]));

    assert_eq!(report.unique_elements[&1], set(&[]));
    assert_eq!(report.unique_elements[&4], set(&["method"]));
    assert_eq!(report.unique_elements[&7], set(&["gadget"]));

    let fired: Vec<(u32, u32, Vec<RestrictionRule>)> = report
        .pairs
        .iter()
        .map(|p| (p.first, p.second, p.findings.clone()))
        .collect();
    assert_eq!(
        fired,
        vec![
            (1, 4, vec![RestrictionRule::ProductProcess]),
            (1, 7, vec![RestrictionRule::Unrelated]),
            (4, 7, vec![RestrictionRule::Unrelated]),
        ]
    );
}
