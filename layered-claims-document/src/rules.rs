//! Rule tables and phrase tables stored as TOML.
//!
//! A rule table is a list of `[[rule]]` entries:
//!
//! ```toml
//! [[rule]]
//! pattern = '\bsubstantially\b'
//! message = "Possible relative term. See MPEP 2173.05(b). # common in older claims"
//!
//! [[rule]]
//! pattern = '\bconfigured to\b'
//! message = "Possible functional language. See MPEP 2173.05(g)."
//! enabled = false
//! ```
//!
//! Text after `#` in a message is a note for table authors and is not
//! shown. Disabled rules are loaded only when forced.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use layered_claims::{PhraseTable, Rule, RuleSet};
use serde::{Deserialize, Serialize};

use crate::{DocumentError, DocumentResult};

const CLAIMS_RULES: &str = include_str!("../rules/claims.toml");
const TITLE_RULES: &str = include_str!("../rules/title.toml");

/// Markers in a message that restrict a rule to dependent claims.
const DEPENDENT_ONLY_MARKERS: [&str; 2] = ["112(d)", "DEPONLY"];

/// One `[[rule]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub pattern: String,
    pub message: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub dependent_only: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl RuleEntry {
    /// The message shown to users.
    pub fn display_message(&self) -> &str {
        self.message.split('#').next().unwrap_or_default().trim()
    }

    pub fn is_dependent_only(&self) -> bool {
        self.dependent_only || DEPENDENT_ONLY_MARKERS.iter().any(|m| self.message.contains(m))
    }
}

#[derive(Debug, Default, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rule: Vec<RuleEntry>,
}

/// A parsed rule table, not yet compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    origin: String,
    entries: Vec<RuleEntry>,
}

impl RuleTable {
    /// Parse TOML `content`. `origin` names the table in errors.
    pub fn parse(content: &str, origin: &str) -> DocumentResult<Self> {
        let file: RuleFile = toml::from_str(content).map_err(|e| DocumentError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut seen = BTreeSet::new();
        for entry in &file.rule {
            if !seen.insert(entry.pattern.as_str()) {
                return Err(DocumentError::DuplicatePattern {
                    path: origin.to_string(),
                    pattern: entry.pattern.clone(),
                });
            }
        }

        Ok(Self {
            origin: origin.to_string(),
            entries: file.rule,
        })
    }

    pub fn load(path: &Path) -> DocumentResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| DocumentError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// The claim rules shipped with the linter.
    pub fn bundled_claims() -> DocumentResult<Self> {
        Self::parse(CLAIMS_RULES, "rules/claims.toml")
    }

    /// The title rules shipped with the linter.
    pub fn bundled_title() -> DocumentResult<Self> {
        Self::parse(TITLE_RULES, "rules/title.toml")
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// Compile the enabled rules, or every rule when `force` is set.
    pub fn compile(&self, force: bool) -> DocumentResult<RuleSet> {
        let mut rules = Vec::new();
        let mut disabled = 0;
        for entry in &self.entries {
            if !entry.enabled && !force {
                disabled += 1;
                continue;
            }
            let rule = Rule::new(&entry.pattern, entry.display_message())
                .map_err(|source| DocumentError::Pattern {
                    path: self.origin.clone(),
                    pattern: entry.pattern.clone(),
                    source,
                })?
                .dependent_only(entry.is_dependent_only());
            rules.push(rule);
        }
        tracing::info!(
            loaded = rules.len(),
            disabled,
            origin = self.origin.as_str(),
            "loaded rule table"
        );
        Ok(RuleSet::new(rules))
    }
}

/// Load a custom [`PhraseTable`] from TOML.
pub fn load_phrase_table(path: &Path) -> DocumentResult<PhraseTable> {
    let content = fs::read_to_string(path).map_err(|e| DocumentError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| DocumentError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
