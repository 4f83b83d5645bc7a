//! Structured claim records built from per-claim text.

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::markup::clean_claim_text;
use crate::{AnalysisContext, AnalysisResult, DiagnosticKind, FatalError};

static CLAIM_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bclaims?\b").expect("Invalid claim word regex"));
static PLURAL_CLAIMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bclaims\b").expect("Invalid plural claims regex"));
// The token after the first "claim" names the parent.
static PARENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bclaim\b\s*(\S*)").expect("Invalid parent token regex"));
static METHOD_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:method|process)\b").expect("Invalid claim type regex")
});

/// Statutory category of an independent claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    Method,
    Apparatus,
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimType::Method => f.write_str("method"),
            ClaimType::Apparatus => f.write_str("apparatus"),
        }
    }
}

/// One claim, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    pub number: u32,
    pub raw_text: String,
    /// Text with markup and escape spans removed.
    pub cleaned_text: String,
    pub is_dependent: bool,
    /// The claim number following the first "claim", when it parsed.
    pub parent_number: Option<u32>,
    /// Only set for independent claims.
    pub claim_type: Option<ClaimType>,
}

impl ClaimRecord {
    pub fn is_independent(&self) -> bool {
        !self.is_dependent
    }
}

/// Builds [`ClaimRecord`]s one claim at a time, enforcing claim numbering.
#[derive(Debug, Default)]
pub struct ClaimRecordBuilder {
    seen: BTreeSet<u32>,
    previous: Option<u32>,
}

impl ClaimRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim numbers accepted so far.
    pub fn seen(&self) -> &BTreeSet<u32> {
        &self.seen
    }

    pub fn push(
        &mut self,
        number: u32,
        text: &str,
        ctx: &mut AnalysisContext,
    ) -> AnalysisResult<ClaimRecord> {
        if self.seen.contains(&number) {
            return Err(FatalError::DuplicateClaim { number });
        }
        if let Some(previous) = self.previous {
            if number <= previous {
                return Err(FatalError::OutOfOrder { number, previous });
            }
        }

        let cleaned_text = clean_claim_text(text)
            .map_err(|source| FatalError::Annotation { claim: number, source })?;
        if cleaned_text.is_empty() {
            return Err(FatalError::EmptyClaim { number });
        }

        let is_dependent = CLAIM_WORD.is_match(&cleaned_text);
        let parent_number = if is_dependent {
            self.parent_of(number, &cleaned_text, ctx)
        } else {
            None
        };
        let claim_type = if is_dependent {
            None
        } else if METHOD_WORD.is_match(&cleaned_text) {
            Some(ClaimType::Method)
        } else {
            Some(ClaimType::Apparatus)
        };

        tracing::debug!(number, is_dependent, ?parent_number, ?claim_type, "built claim record");

        self.seen.insert(number);
        self.previous = Some(number);

        Ok(ClaimRecord {
            number,
            raw_text: text.to_string(),
            cleaned_text,
            is_dependent,
            parent_number,
            claim_type,
        })
    }

    fn parent_of(&self, number: u32, cleaned: &str, ctx: &mut AnalysisContext) -> Option<u32> {
        if PLURAL_CLAIMS.is_match(cleaned) {
            ctx.warn(
                number,
                DiagnosticKind::Dependency,
                format!(
                    "Claim {} is possibly multiple dependent. Claim elements from multiple parents are not inherited.",
                    number
                ),
            );
            return None;
        }

        let token = PARENT_TOKEN
            .captures(cleaned)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let parent = match token
            .trim_end_matches(|c: char| c.is_ascii_punctuation())
            .parse::<u32>()
        {
            Ok(parent) => parent,
            Err(_) => {
                ctx.warn(
                    number,
                    DiagnosticKind::Dependency,
                    format!(
                        "Claim {} possibly has an invalid parent claim number: \"{}\".",
                        number, token
                    ),
                );
                return None;
            }
        };

        if parent == number {
            ctx.warn(
                number,
                DiagnosticKind::Dependency,
                format!("Claim {} depends on itself.", number),
            );
        } else if parent > number {
            ctx.warn(
                number,
                DiagnosticKind::Dependency,
                format!(
                    "Claim {} depends on claim {}, which is not a preceding claim.",
                    number, parent
                ),
            );
        } else if !self.seen.contains(&parent) {
            ctx.warn(
                number,
                DiagnosticKind::Dependency,
                format!("Claim {} depends on non-existent claim {}.", number, parent),
            );
        }

        Some(parent)
    }
}

/// Build records for a whole claim set.
pub fn build_records<I, S>(claims: I, ctx: &mut AnalysisContext) -> AnalysisResult<Vec<ClaimRecord>>
where
    I: IntoIterator<Item = (u32, S)>,
    S: AsRef<str>,
{
    let mut builder = ClaimRecordBuilder::new();
    claims
        .into_iter()
        .map(|(number, text)| builder.push(number, text.as_ref(), ctx))
        .collect()
}
