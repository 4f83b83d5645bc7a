//! Command-line options and JSON run configurations.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use layered_claims::{AnalysisConfig, PhraseTable};
use serde::Deserialize;

use crate::error::CliError;
use crate::logging::LogLevel;

/// Patent claim linter: antecedent basis, restriction and drafting checks.
///
/// Options can also be read from a JSON file given in place of the claims
/// file. Its keys are the long option names with `_` for `-`; options given
/// on the command line take precedence.
#[derive(Debug, Clone, Default, Parser, Deserialize)]
#[command(name = "claimlint", version, disable_version_flag = true)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Cli {
    /// Claims file, or a JSON run configuration ending in `.json`.
    pub claims: Option<PathBuf>,

    /// Check claims for antecedent basis issues.
    #[arg(short = 'a', long)]
    pub ant_basis: bool,

    /// Analyze claims up to and including this claim number.
    #[arg(short = 'c', long, value_name = "N")]
    pub to_claim: Option<u32>,

    /// Claim rule table (TOML) to use instead of the bundled one.
    #[arg(short = 'C', long, value_name = "FILE")]
    pub claims_warnings: Option<PathBuf>,

    /// Print debugging information.
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Check for -ly and -ing word endings.
    #[arg(short = 'e', long)]
    pub endings: bool,

    /// Hide warnings matching this regex. May be repeated.
    #[arg(short = 'f', long, value_name = "REGEX", action = ArgAction::Append)]
    pub filter: Vec<String>,

    /// Enable rules that are disabled in the rule tables.
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Don't automatically mark previously introduced claim elements.
    #[arg(short = 'm', long)]
    pub manual_marking: bool,

    /// Equivalent to --ant-basis --restriction --endings --uspto.
    #[arg(short = 'n', long)]
    pub nitpick: bool,

    /// Write warnings to <claims>.out.
    #[arg(short = 'o', long)]
    pub outfile: bool,

    /// Analyze claims for restriction. Implies --ant-basis.
    #[arg(short = 'r', long)]
    pub restriction: bool,

    /// Specification text file.
    #[arg(short = 's', long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// Document title.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Examiner mode: attribute time notes and a search string.
    #[arg(short = 'U', long)]
    pub uspto: bool,

    /// Print additional information.
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Print diagnostics as JSON.
    #[arg(long)]
    pub json: bool,

    /// Phrase table (TOML) to use for automatic marking.
    #[arg(long, value_name = "FILE")]
    pub phrase_table: Option<PathBuf>,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[serde(skip)]
    version: Option<bool>,
}

impl Cli {
    /// Fold in a JSON run configuration when one was given, and check that a
    /// claims file is known.
    pub fn resolve(self) -> Result<Self, CliError> {
        let path = self.claims.clone().ok_or(CliError::MissingClaims)?;
        if !is_json(&path) {
            return Ok(self);
        }

        let config_error = |message: String| CliError::Config {
            path: path.display().to_string(),
            message,
        };
        let content = fs::read_to_string(&path).map_err(|e| config_error(e.to_string()))?;
        let file: Cli = serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?;
        tracing::debug!(config = %path.display(), "read run configuration");

        let merged = self.merge(file);
        match &merged.claims {
            Some(claims) if !is_json(claims) => Ok(merged),
            _ => Err(CliError::MissingClaims),
        }
    }

    /// Options set here win; the rest come from `file`.
    fn merge(self, file: Cli) -> Self {
        Self {
            claims: file.claims,
            ant_basis: self.ant_basis || file.ant_basis,
            to_claim: self.to_claim.or(file.to_claim),
            claims_warnings: self.claims_warnings.or(file.claims_warnings),
            debug: self.debug || file.debug,
            endings: self.endings || file.endings,
            filter: if self.filter.is_empty() {
                file.filter
            } else {
                self.filter
            },
            force: self.force || file.force,
            manual_marking: self.manual_marking || file.manual_marking,
            nitpick: self.nitpick || file.nitpick,
            outfile: self.outfile || file.outfile,
            restriction: self.restriction || file.restriction,
            spec: self.spec.or(file.spec),
            title: self.title.or(file.title),
            uspto: self.uspto || file.uspto,
            verbose: self.verbose || file.verbose,
            json: self.json || file.json,
            phrase_table: self.phrase_table.or(file.phrase_table),
            version: None,
        }
    }

    pub fn claims_path(&self) -> Result<&Path, CliError> {
        self.claims.as_deref().ok_or(CliError::MissingClaims)
    }

    pub fn examiner(&self) -> bool {
        self.uspto || self.nitpick
    }

    pub fn analysis_config(&self, phrase_table: PhraseTable) -> AnalysisConfig {
        AnalysisConfig::standard()
            .with_antecedent_basis(self.ant_basis || self.nitpick)
            .with_restriction(self.restriction || self.nitpick)
            .with_endings(self.endings || self.nitpick)
            .with_examiner(self.examiner())
            .with_manual_marking(self.manual_marking)
            .with_stop_at_claim(self.to_claim)
            .with_phrase_table(phrase_table)
    }

    pub fn log_level(&self) -> LogLevel {
        if self.debug {
            LogLevel::Debug
        } else if self.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("claimlint").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-a", "-c", "3", "-f", "adverb", "-f", "MPEP 2181", "-V", "claims.txt"]);
        assert!(cli.ant_basis);
        assert_eq!(cli.to_claim, Some(3));
        assert_eq!(cli.filter, vec!["adverb", "MPEP 2181"]);
        assert_eq!(cli.log_level(), LogLevel::Info);
        assert_eq!(cli.claims_path().unwrap(), Path::new("claims.txt"));
    }

    #[test]
    fn nitpick_enables_everything() {
        let config = parse(&["-n", "claims.txt"]).analysis_config(PhraseTable::standard());
        assert!(config.antecedent_basis && config.restriction && config.endings && config.examiner);

        let config = parse(&["-r", "claims.txt"]).analysis_config(PhraseTable::standard());
        assert!(config.checks_antecedent_basis());
        assert!(!config.endings);
    }

    #[test]
    fn json_fills_unset_options() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"claims": "claims.txt", "to_claim": 5, "endings": true, "filter": ["adverb"]}}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let cli = parse(&["-c", "2", path]).resolve().unwrap();
        assert_eq!(cli.claims_path().unwrap(), Path::new("claims.txt"));
        assert_eq!(cli.to_claim, Some(2));
        assert!(cli.endings);
        assert_eq!(cli.filter, vec!["adverb"]);
    }

    #[test]
    fn json_rejects_unknown_options() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"claims": "claims.txt", "colour": true}}"#).unwrap();

        let err = parse(&[file.path().to_str().unwrap()]).resolve().unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn json_must_name_claims() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"nitpick": true}}"#).unwrap();

        let err = parse(&[file.path().to_str().unwrap()]).resolve().unwrap_err();
        assert!(matches!(err, CliError::MissingClaims));
    }
}
