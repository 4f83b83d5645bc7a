//! The lexical grammar used to place element markers automatically.

use serde::{Deserialize, Serialize};

/// Version of [`PhraseTable::standard`]. Bump whenever its contents change.
pub const PHRASE_TABLE_VERSION: u32 = 2;

/// Ordered phrase lists driving automatic element marking.
///
/// Quantifiers are applied in list order, so a phrase listed earlier wins
/// when one quantifier is a textual prefix of another ("two or more" before
/// "two"). Articles are matched case-sensitively as written; quantifiers and
/// boundaries match case-insensitively on whole words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTable {
    pub version: u32,
    /// Plural quantifiers that start a new element without an article.
    pub quantifiers: Vec<String>,
    /// Articles introducing a new element.
    pub new_articles: Vec<String>,
    /// Articles referring back to an element.
    pub old_articles: Vec<String>,
    /// Phrases before which an automatically opened element ends.
    pub boundaries: Vec<String>,
}

fn owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

impl PhraseTable {
    pub fn standard() -> Self {
        Self {
            version: PHRASE_TABLE_VERSION,
            quantifiers: owned(&[
                "at least one",
                "one or more",
                "more than one",
                "two or more",
                "two",
                "three",
                "four",
                "five",
                "six",
                "seven",
                "eight",
                "nine",
                "ten",
            ]),
            new_articles: owned(&["A", "a", "An", "an"]),
            old_articles: owned(&["The", "the", "Said", "said"]),
            boundaries: owned(&[
                // transitions
                "comprising",
                "comprises",
                "comprise",
                "including",
                "includes",
                "consisting",
                "having",
                // clauses
                "wherein",
                "whereby",
                "which",
                "that",
                // relations
                "coupled",
                "connected",
                "attached",
                "mounted",
                "configured",
                "disposed",
                "positioned",
                "located",
                "arranged",
                "adapted",
                "operable",
                "formed",
                "extending",
                // dependency preambles
                "of claim",
                "of claims",
                "according to claim",
                "according to claims",
                "as recited in claim",
                "as claimed in claim",
                "as defined in claim",
                "as set forth in claim",
            ]),
        }
    }

    pub fn with_quantifiers(mut self, quantifiers: Vec<String>) -> Self {
        self.quantifiers = quantifiers;
        self
    }

    pub fn with_boundaries(mut self, boundaries: Vec<String>) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn is_current(&self) -> bool {
        self.version == PHRASE_TABLE_VERSION
    }
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self::standard()
    }
}
