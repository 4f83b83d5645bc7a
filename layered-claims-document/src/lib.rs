#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Input documents for layered-claims.
//!
//! ## Modules
//!
//! - [`claims`] - Reads a claims file into numbered claims
//! - [`specification`] - Definition and species-election scans over the description
//! - [`rules`] - TOML rule tables and phrase tables
//! - [`title`] - Title length and title rules
//! - [`errors`] - Error types for document loading

pub mod claims;
pub mod errors;
pub mod rules;
pub mod specification;
pub mod title;

pub use claims::ClaimSource;
pub use errors::{DocumentError, DocumentResult};
pub use rules::{load_phrase_table, RuleEntry, RuleTable};
pub use specification::Specification;
pub use title::{check_title, MAX_TITLE_LEN};
