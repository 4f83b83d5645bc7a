//! The full claim analysis, stage by stage.

use std::collections::BTreeMap;

use crate::{
    lint, AnalysisConfig, AnalysisContext, AnalysisResult, AnnotatedClaim, Annotator,
    AntecedentChecker, ClaimElements, ClaimRecord, ClaimRecordBuilder, DependencyGraph,
    DependencyResolver, DiagnosticKind, EndingsChecker, FatalError, IndependentClaim,
    RestrictionAnalyzer, RestrictionReport, RuleSet,
};

/// Everything learned about a claim set.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub records: Vec<ClaimRecord>,
    /// Marked claims, when antecedent basis was checked.
    pub annotated: Vec<AnnotatedClaim>,
    pub elements: BTreeMap<u32, ClaimElements>,
    pub graph: DependencyGraph,
    pub restriction: Option<RestrictionReport>,
    /// Set when claims after this one were left out.
    pub stopped_at: Option<u32>,
}

impl Analysis {
    pub fn independent_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_independent()).count()
    }

    pub fn dependent_count(&self) -> usize {
        self.records.len() - self.independent_count()
    }

    pub fn record(&self, claim: u32) -> Option<&ClaimRecord> {
        self.records.iter().find(|r| r.number == claim)
    }
}

/// Runs the configured analyses over a claim set.
///
/// ```ignore
/// let analyzer = ClaimAnalyzer::new(AnalysisConfig::nitpick())?;
/// let mut ctx = AnalysisContext::new();
/// let analysis = analyzer.analyze(vec![(1, "A widget.")], &mut ctx)?;
/// ```
#[derive(Debug, Clone)]
pub struct ClaimAnalyzer {
    config: AnalysisConfig,
    annotator: Annotator,
    checker: AntecedentChecker,
    endings: EndingsChecker,
    rules: RuleSet,
}

impl ClaimAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, regex::Error> {
        let annotator =
            Annotator::new(&config.phrase_table)?.with_manual_marking(config.manual_marking);
        let checker = AntecedentChecker::new().with_max_element_len(config.max_element_len);
        Ok(Self {
            config,
            annotator,
            checker,
            endings: EndingsChecker::new(),
            rules: RuleSet::default(),
        })
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_endings(mut self, endings: EndingsChecker) -> Self {
        self.endings = endings;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze claims given in order as (number, text) pairs.
    ///
    /// Diagnostics go to `ctx`, which keeps everything reported before a
    /// fatal error.
    pub fn analyze<I, S>(&self, claims: I, ctx: &mut AnalysisContext) -> AnalysisResult<Analysis>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: AsRef<str>,
    {
        let mut analysis = Analysis::default();
        let mut builder = ClaimRecordBuilder::new();
        let mut resolver = DependencyResolver::new();
        let check_basis = self.config.checks_antecedent_basis();

        for (number, text) in claims {
            if let Some(limit) = self.config.stop_at_claim {
                if number > limit {
                    ctx.note(
                        DiagnosticKind::Cutoff,
                        format!("Not all claims were analyzed. Stopped at claim {}.", limit),
                    );
                    analysis.stopped_at = Some(limit);
                    break;
                }
            }

            let record = builder.push(number, text.as_ref(), ctx)?;
            resolver.register(&record);

            lint::check_style(&record, ctx);
            lint::check_use_claim(&record, ctx);
            if self.config.endings {
                self.endings.check(&record, ctx);
            }
            self.rules.check_claim(&record, ctx);

            if check_basis {
                let inherited = resolver.inherited_for(&record, ctx);
                let annotated = self
                    .annotator
                    .annotate(number, &record.raw_text, inherited.phrases(), ctx)
                    .map_err(|source| FatalError::Annotation { claim: number, source })?;
                let elements = self.checker.check(&annotated, inherited, ctx);
                resolver.record(number, &elements);
                analysis.elements.insert(number, elements);
                analysis.annotated.push(annotated);
            }

            analysis.records.push(record);
        }

        lint::check_least_restrictive(&analysis.records, ctx);
        if check_basis {
            let counts: Vec<(u32, usize)> = analysis
                .records
                .iter()
                .filter(|r| r.is_independent())
                .map(|r| (r.number, analysis.elements.get(&r.number).map_or(0, |e| e.own.len())))
                .collect();
            lint::check_fewest_elements(&counts, ctx);
        }

        if self.config.restriction {
            let independent = independent_claims(&analysis, &resolver);
            let has_dependents = resolver.graph().dependent_count() > 0;
            analysis.restriction =
                Some(RestrictionAnalyzer::new().analyze(&independent, has_dependents, ctx));
        }

        if self.config.examiner {
            lint::check_claim_counts(analysis.independent_count(), analysis.dependent_count(), ctx);
        }

        analysis.graph = resolver.into_graph();
        tracing::debug!(
            claims = analysis.records.len(),
            diagnostics = ctx.diagnostics().len(),
            "analysis finished"
        );
        Ok(analysis)
    }
}

fn independent_claims(analysis: &Analysis, resolver: &DependencyResolver) -> Vec<IndependentClaim> {
    let groups = resolver.claim_group_elements();
    analysis
        .records
        .iter()
        .filter_map(|record| {
            let claim_type = record.claim_type?;
            Some(IndependentClaim {
                number: record.number,
                claim_type,
                elements: resolver.own(record.number).cloned().unwrap_or_default(),
                group_elements: groups.get(&record.number).cloned().unwrap_or_default(),
            })
        })
        .collect()
}
