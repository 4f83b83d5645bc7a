//! One `claimlint` run, from files on disk to diagnostics and reports.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use layered_claims::{
    check_disclosure, AnalysisContext, ClaimAnalyzer, MarkedClaimDisplay, PhraseTable, RunOutcome,
};
use layered_claims_document::{check_title, load_phrase_table, ClaimSource, RuleTable, Specification};

use crate::cli::Cli;
use crate::error::CliError;
use crate::report;
use crate::sink::DiagnosticSink;

fn output(cli: &Cli) -> Result<Box<dyn Write>, CliError> {
    if cli.outfile {
        let path = report::sibling_path(cli.claims_path()?, "out");
        tracing::info!(path = %path.display(), "writing warnings to file");
        let file = File::create(&path).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Box::new(BufWriter::new(file)))
    } else if cli.json {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(io::stderr()))
    }
}

pub(crate) fn run(cli: &Cli) -> Result<RunOutcome, CliError> {
    let claims_path = cli.claims_path()?;
    let source = ClaimSource::load(claims_path)?;
    tracing::info!(claims = source.len(), path = %claims_path.display(), "loaded claims");

    let table = match &cli.claims_warnings {
        Some(path) => RuleTable::load(path)?,
        None => RuleTable::bundled_claims()?,
    };
    let rules = table.compile(cli.force)?;

    let phrase_table = match &cli.phrase_table {
        Some(path) => load_phrase_table(path)?,
        None => PhraseTable::standard(),
    };
    let config = cli.analysis_config(phrase_table);
    let checks_antecedent_basis = config.checks_antecedent_basis();
    let restriction = config.restriction;
    let analyzer = ClaimAnalyzer::new(config)
        .map_err(CliError::PhraseTable)?
        .with_rules(rules);

    let mut sink = DiagnosticSink::new(output(cli)?, &cli.filter, cli.json)?;
    let mut ctx = AnalysisContext::new();

    if let Some(title) = &cli.title {
        let title_rules = RuleTable::bundled_title()?.compile(cli.force)?;
        check_title(title, &title_rules, &mut ctx);
    }

    let spec = cli.spec.as_deref().map(Specification::load).transpose()?;
    if let Some(spec) = &spec {
        let definitions = spec.check_definitions(&mut ctx);
        tracing::debug!(definitions, "checked spec for definitions");
    }

    let analysis = match analyzer.analyze(source.iter(), &mut ctx) {
        Ok(analysis) => analysis,
        Err(err) => {
            sink.emit_all(ctx.diagnostics())?;
            sink.finish(None)?;
            return Ok(RunOutcome::Aborted(err));
        }
    };

    if checks_antecedent_basis {
        for claim in &analysis.annotated {
            tracing::debug!("claim {}\n{}", claim.claim, MarkedClaimDisplay::new(claim));
        }
        report::write_marked(&report::sibling_path(claims_path, "marked"), &analysis.annotated)?;
        if let Some(spec) = &spec {
            check_disclosure(&spec.text(), &analysis.elements, &mut ctx);
        }
    }
    if restriction {
        if let Some(spec) = &spec {
            spec.check_species_elections(&mut ctx);
        }
    }

    sink.emit_all(ctx.diagnostics())?;
    if let Some(restriction) = &analysis.restriction {
        report::write_restriction(&mut sink, restriction)?;
    }
    if cli.examiner() {
        let search = sink.search_string();
        if !search.is_empty() {
            sink.line(format_args!("\nSearch string: {}", search))?;
        }
    }

    let warnings = sink.finish(analysis.restriction.as_ref())?;
    if !cli.json {
        report::write_summary(&mut io::stdout().lock(), &analysis, warnings)?;
    }
    Ok(RunOutcome::from_warning_count(warnings))
}
