//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::{PhraseTable, DEFAULT_MAX_ELEMENT_LEN};

/// Which analyses run, and their parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Mark elements and check antecedent basis.
    pub antecedent_basis: bool,
    /// Compare independent claims for restriction. Implies antecedent basis.
    pub restriction: bool,
    /// Flag -ly and -ing words.
    pub endings: bool,
    /// Add examiner-oriented notes.
    pub examiner: bool,
    /// Leave old-element spans to the author's markup.
    pub manual_marking: bool,
    /// Ignore claims numbered above this.
    pub stop_at_claim: Option<u32>,
    pub max_element_len: usize,
    pub phrase_table: PhraseTable,
}

impl AnalysisConfig {
    /// Style and rule checks only.
    pub fn standard() -> Self {
        Self {
            antecedent_basis: false,
            restriction: false,
            endings: false,
            examiner: false,
            manual_marking: false,
            stop_at_claim: None,
            max_element_len: DEFAULT_MAX_ELEMENT_LEN,
            phrase_table: PhraseTable::standard(),
        }
    }

    /// Every claim analysis.
    pub fn nitpick() -> Self {
        Self {
            antecedent_basis: true,
            restriction: true,
            endings: true,
            ..Self::standard()
        }
    }

    pub fn with_antecedent_basis(mut self, enabled: bool) -> Self {
        self.antecedent_basis = enabled;
        self
    }

    pub fn with_restriction(mut self, enabled: bool) -> Self {
        self.restriction = enabled;
        self
    }

    pub fn with_endings(mut self, enabled: bool) -> Self {
        self.endings = enabled;
        self
    }

    pub fn with_examiner(mut self, enabled: bool) -> Self {
        self.examiner = enabled;
        self
    }

    pub fn with_manual_marking(mut self, enabled: bool) -> Self {
        self.manual_marking = enabled;
        self
    }

    pub fn with_stop_at_claim(mut self, claim: Option<u32>) -> Self {
        self.stop_at_claim = claim;
        self
    }

    pub fn with_phrase_table(mut self, table: PhraseTable) -> Self {
        self.phrase_table = table;
        self
    }

    pub fn checks_antecedent_basis(&self) -> bool {
        self.antecedent_basis || self.restriction
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::standard()
    }
}
