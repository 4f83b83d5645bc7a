//! Title checks.

use layered_claims::{AnalysisContext, Diagnostic, DiagnosticKind, RuleSet};

/// Longest title allowed by 37 CFR 1.72.
pub const MAX_TITLE_LEN: usize = 500;

/// Check the title's length, then apply the title rules.
pub fn check_title(title: &str, rules: &RuleSet, ctx: &mut AnalysisContext) {
    let title = title.trim();
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        ctx.push(Diagnostic::warning(
            None,
            DiagnosticKind::Title,
            format!(
                "The title is {} characters long. The maximum title length under 37 CFR 1.72 is {} characters. See MPEP 606.",
                len, MAX_TITLE_LEN
            ),
        ));
    }
    rules.check_text("Title", title, DiagnosticKind::Title, ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleTable;

    fn title_rules() -> RuleSet {
        RuleTable::bundled_title().unwrap().compile(false).unwrap()
    }

    #[test]
    fn bundled_rules() {
        let mut ctx = AnalysisContext::new();
        check_title("  An improved fastening system ", &title_rules(), &mut ctx);

        insta::assert_snapshot!(
            ctx.diagnostics().iter().map(|d| d.message.as_str()).collect::<Vec<_>>().join("\n"),
            @r###"
        Title recites "An". Titles should not start with an article. See MPEP 606.
        Title recites "improved". Possibly non-descriptive title language. See MPEP 606.
        "###
        );
    }

    #[test]
    fn length_limit() {
        let mut ctx = AnalysisContext::new();
        check_title(&"x".repeat(MAX_TITLE_LEN), &RuleSet::default(), &mut ctx);
        assert!(ctx.diagnostics().is_empty());

        check_title(&"x".repeat(MAX_TITLE_LEN + 1), &RuleSet::default(), &mut ctx);
        assert_eq!(ctx.warning_count(), 1);
        assert!(ctx.diagnostics()[0].message.starts_with("The title is 501 characters long."));
    }
}
