//! Human-readable reports: marked claims, restriction tables, summary.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use layered_claims::{Analysis, AnnotatedClaim, RestrictionReport};

use crate::error::CliError;
use crate::sink::DiagnosticSink;

/// `<claims>.<extension>`, next to the claims file.
pub(crate) fn sibling_path(claims: &Path, extension: &str) -> PathBuf {
    let mut name = claims.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// One claim per paragraph, with a line break after each "; " and ": ".
pub(crate) fn marked_claims(annotated: &[AnnotatedClaim]) -> String {
    annotated
        .iter()
        .map(|claim| {
            format!(
                "{}. {}\n\n",
                claim.claim,
                claim.marked.replace("; ", ";\n").replace(": ", ":\n")
            )
        })
        .collect()
}

pub(crate) fn write_marked(path: &Path, annotated: &[AnnotatedClaim]) -> Result<(), CliError> {
    tracing::info!(path = %path.display(), "writing marked claims");
    fs::write(path, marked_claims(annotated)).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn list(elements: &BTreeSet<String>) -> String {
    if elements.is_empty() {
        "none".to_string()
    } else {
        elements.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

pub(crate) fn write_restriction<W: Write>(
    sink: &mut DiagnosticSink<W>,
    report: &RestrictionReport,
) -> io::Result<()> {
    if report.pairs.is_empty() {
        return Ok(());
    }
    sink.line("\n\"Catalog of parts\" restriction analysis:\n")?;
    for pair in &report.pairs {
        let (x, y) = (pair.first, pair.second);
        let e = &pair.elements;
        sink.line(format_args!("Category of claim {}: {}", x, pair.first_type))?;
        sink.line(format_args!("Category of claim {}: {}", y, pair.second_type))?;
        sink.line(format_args!(
            "Elements common to claims {} and {} ({} total): {}",
            x,
            y,
            e.common.len(),
            list(&e.common)
        ))?;
        sink.line(format_args!(
            "Elements unique to claim {} ({} total): {}",
            x,
            e.unique_first.len(),
            list(&e.unique_first)
        ))?;
        sink.line(format_args!(
            "Elements unique to claim {} ({} total): {}",
            y,
            e.unique_second.len(),
            list(&e.unique_second)
        ))?;
        if let Some(g) = &pair.group_elements {
            sink.line(format_args!(
                "Elements common to claims {} and {} and their dependents ({} total): {}",
                x,
                y,
                g.common.len(),
                list(&g.common)
            ))?;
            sink.line(format_args!(
                "Elements unique to claim {} and its dependents ({} total): {}",
                x,
                g.unique_first.len(),
                list(&g.unique_first)
            ))?;
            sink.line(format_args!(
                "Elements unique to claim {} and its dependents ({} total): {}",
                y,
                g.unique_second.len(),
                list(&g.unique_second)
            ))?;
        }
        sink.line("")?;
    }
    for (claim, unique) in &report.unique_elements {
        sink.line(format_args!(
            "Elements unique to claim {} alone compared against all other independent claims and their dependents ({} total): {}",
            claim,
            unique.len(),
            list(unique)
        ))?;
    }
    Ok(())
}

pub(crate) fn write_summary<W: Write>(out: &mut W, analysis: &Analysis, warnings: usize) -> io::Result<()> {
    let types: Vec<String> = analysis
        .records
        .iter()
        .filter_map(|r| r.claim_type.map(|t| format!("{}: {}", r.number, t)))
        .collect();
    writeln!(out)?;
    writeln!(out, "Summary statistics:")?;
    writeln!(out, "# of claims: {}", analysis.records.len())?;
    writeln!(out, "Indep. claims: {} ({})", analysis.independent_count(), types.join(", "))?;
    writeln!(out, "Depen. claims: {}", analysis.dependent_count())?;
    writeln!(out, "Warnings: {}", warnings)
}
