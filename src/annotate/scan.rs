//! First pass: decide where automatic markers go.
//!
//! Every decision is made against the immutable source text and recorded as
//! an insertion or deletion keyed by byte offset. The plan is applied once,
//! producing the piece stream the closing passes work on.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use regex::{Regex, RegexBuilder};

use super::piece::{MarkSource, Piece, SpanKind};
use crate::markup::{is_word_char, COMMENT};
use crate::PhraseTable;

/// Whole-word pattern for a phrase, tolerant of runs of whitespace.
fn phrase_pattern(phrase: &str) -> String {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    format!(r"\b{}\b", words.join(r"\s+"))
}

fn alternation(phrases: &[String]) -> String {
    let mut sorted: Vec<&String> = phrases.iter().collect();
    // Longest first so multi-word phrases win over their first word.
    sorted.sort_by_key(|p| std::cmp::Reverse(p.len()));
    sorted
        .iter()
        .map(|p| {
            p.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// An article followed by a single space and a word character.
fn article_pattern(articles: &[String]) -> String {
    format!(r"\b(?:{}) \b", alternation(articles))
}

#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    quantifiers: Vec<Regex>,
    new_article: Option<Regex>,
    old_article: Option<Regex>,
    boundary: Option<Regex>,
}

impl Scanner {
    pub(crate) fn new(table: &PhraseTable) -> Result<Self, regex::Error> {
        let quantifiers = table
            .quantifiers
            .iter()
            .map(|q| {
                RegexBuilder::new(&phrase_pattern(q))
                    .case_insensitive(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let new_article = non_empty(&table.new_articles)
            .map(|a| Regex::new(&article_pattern(a)))
            .transpose()?;
        let old_article = non_empty(&table.old_articles)
            .map(|a| Regex::new(&article_pattern(a)))
            .transpose()?;
        let boundary = non_empty(&table.boundaries)
            .map(|b| {
                RegexBuilder::new(&format!(r"\b(?:{})\b", alternation(b)))
                    .case_insensitive(true)
                    .build()
            })
            .transpose()?;

        Ok(Self {
            quantifiers,
            new_article,
            old_article,
            boundary,
        })
    }

    pub(crate) fn scan(&self, text: &str) -> Vec<Piece> {
        let mut plan = Plan::default();

        for quantifier in &self.quantifiers {
            for m in quantifier.find_iter(text) {
                let start = m.start();
                plan.protected.push(m.range());
                if plan.has_opener(start)
                    || matches!(prev_char(text, start), Some('[') | Some('{') | Some(COMMENT))
                    || preceded_by_definite_article(text, start)
                {
                    continue;
                }
                plan.boundary_before(text, start);
                plan.open(start, SpanKind::New);
            }
        }

        let articles = [
            (&self.new_article, SpanKind::New),
            (&self.old_article, SpanKind::Old),
        ];
        for (article, kind) in articles {
            let article = match article {
                Some(article) => article,
                None => continue,
            };
            for m in article.find_iter(text) {
                if prev_char(text, m.start()) == Some(COMMENT) || plan.has_opener(m.end()) {
                    continue;
                }
                plan.boundary_before(text, m.start());
                plan.open(m.end(), kind);
            }
        }

        if let Some(boundary) = &self.boundary {
            for m in boundary.find_iter(text) {
                if prev_char(text, m.start()) == Some(COMMENT) || plan.is_protected(m.start()) {
                    continue;
                }
                plan.boundary_before(text, m.start());
            }
        }

        for (offset, ch) in text.char_indices() {
            match ch {
                '{' | '[' => plan.boundary_before(text, offset),
                COMMENT => {
                    plan.deletions.insert(offset);
                }
                _ => {}
            }
        }

        plan.apply(text)
    }
}

fn non_empty(phrases: &[String]) -> Option<&[String]> {
    if phrases.is_empty() {
        None
    } else {
        Some(phrases)
    }
}

fn prev_char(text: &str, offset: usize) -> Option<char> {
    text[..offset].chars().next_back()
}

/// Is `offset` immediately preceded by a whole-word "the " or "said "?
fn preceded_by_definite_article(text: &str, offset: usize) -> bool {
    let before = &text[..offset];
    ["the ", "said "].iter().any(|article| {
        let split = match before.len().checked_sub(article.len()) {
            Some(split) if before.is_char_boundary(split) => split,
            _ => return false,
        };
        before[split..].eq_ignore_ascii_case(article)
            && before[..split]
                .chars()
                .next_back()
                .map_or(true, |c| !is_word_char(c))
    })
}

#[derive(Debug, Default)]
struct Plan {
    insertions: BTreeMap<usize, Vec<Piece>>,
    deletions: BTreeSet<usize>,
    /// Every quantifier match, marked or not. Boundary phrases inside one
    /// are ignored.
    protected: Vec<Range<usize>>,
}

impl Plan {
    fn has_opener(&self, offset: usize) -> bool {
        self.insertions
            .get(&offset)
            .map_or(false, |pieces| pieces.iter().any(|p| matches!(p, Piece::Open(..))))
    }

    fn is_protected(&self, offset: usize) -> bool {
        self.protected
            .iter()
            .any(|range| range.start < offset && offset < range.end)
    }

    fn open(&mut self, offset: usize, kind: SpanKind) {
        self.insertions
            .entry(offset)
            .or_default()
            .push(Piece::Open(kind, MarkSource::Auto));
    }

    /// Place a boundary at the start of the whitespace run preceding `offset`.
    fn boundary_before(&mut self, text: &str, offset: usize) {
        let at = text[..offset].trim_end().len();
        let pieces = self.insertions.entry(at).or_default();
        if !pieces.contains(&Piece::Boundary) {
            pieces.insert(0, Piece::Boundary);
        }
    }

    fn apply(self, text: &str) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(text.len() + self.insertions.len() * 2);
        for (offset, ch) in text.char_indices() {
            if let Some(inserted) = self.insertions.get(&offset) {
                pieces.extend(inserted.iter().copied());
            }
            if !self.deletions.contains(&offset) {
                pieces.push(Piece::from_source(ch));
            }
        }
        if let Some(inserted) = self.insertions.get(&text.len()) {
            pieces.extend(inserted.iter().copied());
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::piece::render;

    fn scanned(text: &str) -> String {
        let scanner = Scanner::new(&PhraseTable::standard()).unwrap();
        render(&scanner.scan(text))
    }

    #[test]
    fn articles_open_spans() {
        assert_eq!(
            scanned("A widget and the frame."),
            "A {widget and the [frame."
        );
    }

    #[test]
    fn quantifier_after_definite_article_is_left_alone() {
        assert_eq!(
            scanned("at least one gear meshing with the at least one gear"),
            "{at least one gear meshing with the [at least one gear"
        );
    }

    #[test]
    fn two_or_more_wins_over_two() {
        assert_eq!(scanned("two or more pins"), "{two or more pins");
    }

    #[test]
    fn comment_marker_suppresses_and_disappears() {
        assert_eq!(scanned("#a lot of #two"), "a lot of two");
    }

    #[test]
    fn definite_article_needs_a_word_boundary() {
        assert!(preceded_by_definite_article("the two", 4));
        assert!(preceded_by_definite_article("(said two", 6));
        assert!(!preceded_by_definite_article("bathe two", 6));
    }
}
