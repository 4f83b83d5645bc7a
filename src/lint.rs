//! Per-claim drafting lints that do not need element marking.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use unicode_segmentation::UnicodeSegmentation;

use crate::{AnalysisContext, ClaimRecord, ClaimType, Diagnostic, DiagnosticKind};

static STEP_OR_GERUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:step|\w+ing)\b").expect("Invalid step regex"));

/// Sentence form: final period, and the conventional opening article.
pub fn check_style(record: &ClaimRecord, ctx: &mut AnalysisContext) {
    let n = record.number;
    let text = &record.cleaned_text;

    if !text.ends_with('.') {
        ctx.warn(
            n,
            DiagnosticKind::Style,
            format!("Claim {} does not end with a period. See MPEP 608.01(m).", n),
        );
    }
    if record.is_independent() {
        if !(text.starts_with("A ") || text.starts_with("An ")) {
            ctx.warn(
                n,
                DiagnosticKind::Style,
                format!("Independent claim {} does not start with \"A\" or \"An\".", n),
            );
        }
    } else if !text.starts_with("The ") {
        ctx.warn(
            n,
            DiagnosticKind::Style,
            format!("Dependent claim {} does not start with \"The\".", n),
        );
    }
}

/// A method claim reciting no steps is possibly a "use" claim.
pub fn check_use_claim(record: &ClaimRecord, ctx: &mut AnalysisContext) {
    if record.claim_type != Some(ClaimType::Method) || STEP_OR_GERUND.is_match(&record.cleaned_text)
    {
        return;
    }
    ctx.warn(
        record.number,
        DiagnosticKind::UseClaim,
        format!(
            "Claim {} is a method claim that recites no steps, and is possibly an improper \"use\" claim. See MPEP 2173.05(q).",
            record.number
        ),
    );
}

const LY_EXCEPTIONS: &[&str] = &[
    "ally", "anomaly", "apply", "assembly", "belly", "butterfly", "comply", "family", "fly",
    "holy", "imply", "italy", "jelly", "july", "monopoly", "multiply", "only", "poly", "rally",
    "rely", "reply", "supply", "underbelly",
];

const ING_EXCEPTIONS: &[&str] = &[
    "according", "anything", "awning", "bearing", "bedding", "bring", "building", "bushing",
    "casing", "ceiling", "cling", "clothing", "coating", "comprising", "consisting",
    "corresponding", "coupling", "during", "everything", "fitting", "following", "having",
    "housing", "including", "king", "landing", "lining", "nothing", "opening", "packaging",
    "padding", "ping", "railing", "ring", "siding", "sing", "sling", "something", "spacing",
    "spring", "sting", "string", "swing", "thing", "tubing", "wing", "wiring", "wring",
];

/// Flags possible adverbs (-ly) and possible functional language (-ing).
#[derive(Debug, Clone)]
pub struct EndingsChecker {
    ly_exceptions: BTreeSet<String>,
    ing_exceptions: BTreeSet<String>,
}

impl EndingsChecker {
    pub fn new() -> Self {
        Self {
            ly_exceptions: LY_EXCEPTIONS.iter().map(|s| s.to_string()).collect(),
            ing_exceptions: ING_EXCEPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_exceptions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            let word = word.into().to_lowercase();
            if word.ends_with("ly") {
                self.ly_exceptions.insert(word);
            } else {
                self.ing_exceptions.insert(word);
            }
        }
        self
    }

    pub fn check(&self, record: &ClaimRecord, ctx: &mut AnalysisContext) {
        let n = record.number;
        let mut seen = BTreeSet::new();
        for word in record.cleaned_text.unicode_words() {
            let lower = word.to_lowercase();
            if !seen.insert(lower.clone()) {
                continue;
            }
            if lower.len() > 2 && lower.ends_with("ly") && !self.ly_exceptions.contains(&lower) {
                ctx.warn(
                    n,
                    DiagnosticKind::Ending,
                    format!("Claim {} recites \"{}\", a possible adverb.", n, word),
                );
            } else if lower.len() > 3
                && lower.ends_with("ing")
                && !self.ing_exceptions.contains(&lower)
            {
                ctx.warn(
                    n,
                    DiagnosticKind::Ending,
                    format!(
                        "Claim {} recites \"{}\", which is possibly functional language. See MPEP 2173.05(g).",
                        n, word
                    ),
                );
            }
        }
    }
}

impl Default for EndingsChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// A pattern with the warning it triggers.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    message: String,
    /// Only meaningful for dependent claims, e.g. 35 USC 112(d) checks.
    dependent_only: bool,
}

impl Rule {
    /// Compile `pattern` case-insensitively.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: RegexBuilder::new(pattern).case_insensitive(true).build()?,
            message: message.into(),
            dependent_only: false,
        })
    }

    pub fn dependent_only(mut self, dependent_only: bool) -> Self {
        self.dependent_only = dependent_only;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_dependent_only(&self) -> bool {
        self.dependent_only
    }
}

/// An ordered list of [`Rule`]s.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// One warning per match, rules in table order.
    pub fn check_claim(&self, record: &ClaimRecord, ctx: &mut AnalysisContext) {
        for rule in &self.rules {
            if rule.dependent_only && record.is_independent() {
                continue;
            }
            for m in rule.pattern.find_iter(&record.cleaned_text) {
                ctx.warn(
                    record.number,
                    DiagnosticKind::Rule,
                    format!("Claim {} recites \"{}\". {}", record.number, m.as_str(), rule.message),
                );
            }
        }
    }

    /// Apply the rules to free text such as a title, labelled `subject`.
    pub fn check_text(&self, subject: &str, text: &str, kind: DiagnosticKind, ctx: &mut AnalysisContext) {
        for rule in &self.rules {
            for m in rule.pattern.find_iter(text) {
                ctx.push(Diagnostic::warning(
                    None,
                    kind,
                    format!("{} recites \"{}\". {}", subject, m.as_str(), rule.message),
                ));
            }
        }
    }
}

/// The shortest independent claim is likely the broadest and conventionally
/// comes first.
pub fn check_least_restrictive(records: &[ClaimRecord], ctx: &mut AnalysisContext) {
    let independent: Vec<&ClaimRecord> = records.iter().filter(|r| r.is_independent()).collect();
    let first = match independent.first() {
        Some(first) if independent.len() > 1 => first.number,
        _ => return,
    };
    let shortest = independent
        .iter()
        .min_by_key(|r| (r.cleaned_text.chars().count(), r.number));
    if let Some(shortest) = shortest {
        if shortest.number != first {
            ctx.warn(
                shortest.number,
                DiagnosticKind::LeastRestrictive,
                format!(
                    "Claim {} is the shortest independent claim ({} characters) and possibly the least restrictive. Consider making it claim {}.",
                    shortest.number,
                    shortest.cleaned_text.chars().count(),
                    first
                ),
            );
        }
    }
}

/// Same check by number of elements introduced. `counts` pairs each
/// independent claim with its element count, in claim order.
pub fn check_fewest_elements(counts: &[(u32, usize)], ctx: &mut AnalysisContext) {
    let first = match counts.first() {
        Some((first, _)) if counts.len() > 1 => *first,
        _ => return,
    };
    if let Some((claim, count)) = counts.iter().min_by_key(|(claim, count)| (*count, *claim)) {
        if *claim != first {
            ctx.warn(
                *claim,
                DiagnosticKind::LeastRestrictive,
                format!(
                    "Claim {} introduces the fewest claim elements ({}) and is possibly the least restrictive. Consider making it claim {}.",
                    claim, count, first
                ),
            );
        }
    }
}

/// Examiner attribute-time thresholds.
pub const ATTRIBUTE_INDEPENDENT_CLAIMS: usize = 4;
pub const ATTRIBUTE_DEPENDENT_CLAIMS: usize = 25;

pub fn check_claim_counts(independent: usize, dependent: usize, ctx: &mut AnalysisContext) {
    if independent >= ATTRIBUTE_INDEPENDENT_CLAIMS {
        ctx.note(
            DiagnosticKind::Examiner,
            format!(
                "{} independent claims. Attribute time for {} or more independent claims may be claimed.",
                independent, ATTRIBUTE_INDEPENDENT_CLAIMS
            ),
        );
    }
    if dependent >= ATTRIBUTE_DEPENDENT_CLAIMS {
        ctx.note(
            DiagnosticKind::Examiner,
            format!(
                "{} dependent claims. Attribute time for {} or more dependent claims may be claimed.",
                dependent, ATTRIBUTE_DEPENDENT_CLAIMS
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_records;

    fn lint(claims: &[(u32, &str)], check: impl Fn(&ClaimRecord, &mut AnalysisContext)) -> Vec<String> {
        let mut ctx = AnalysisContext::new();
        let records = build_records(claims.iter().copied(), &mut ctx).unwrap();
        for record in &records {
            check(record, &mut ctx);
        }
        ctx.into_diagnostics().into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn style() {
        let messages = lint(
            &[(1, "The widget"), (2, "A widget of claim 1.")],
            check_style,
        );
        insta::assert_snapshot!(messages.join("\n"), @r###"
        Claim 1 does not end with a period. See MPEP 608.01(m).
        Independent claim 1 does not start with "A" or "An".
        Dependent claim 2 does not start with "The".
        "###);
    }

    #[test]
    fn use_claims() {
        let messages = lint(
            &[
                (1, "A method of a widget."),
                (2, "A method comprising heating a widget."),
                (3, "A process comprising the step of a widget."),
            ],
            check_use_claim,
        );
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Claim 1 is a method claim that recites no steps"));
    }

    #[test]
    fn endings() {
        let checker = EndingsChecker::new().with_exceptions(["rotating"]);
        let messages = lint(
            &[(
                1,
                "A spring only slightly rotating a housing, and slightly bending the housing.",
            )],
            |record, ctx| checker.check(record, ctx),
        );
        insta::assert_snapshot!(messages.join("\n"), @r###"
        Claim 1 recites "slightly", a possible adverb.
        Claim 1 recites "bending", which is possibly functional language. See MPEP 2173.05(g).
        "###);
    }

    #[test]
    fn claim_counts() {
        let mut ctx = AnalysisContext::new();
        check_claim_counts(3, 24, &mut ctx);
        assert!(ctx.diagnostics().is_empty());

        check_claim_counts(4, 25, &mut ctx);
        assert_eq!(ctx.diagnostics().len(), 2);
        assert_eq!(ctx.warning_count(), 0);
    }

    #[test]
    fn fewest_elements() {
        let mut ctx = AnalysisContext::new();
        check_fewest_elements(&[(1, 3), (5, 2), (9, 2)], &mut ctx);
        assert_eq!(
            ctx.diagnostics()[0].message,
            "Claim 5 introduces the fewest claim elements (2) and is possibly the least restrictive. Consider making it claim 1."
        );
    }
}
