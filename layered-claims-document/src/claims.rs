//! Reading a claims file into one string per claim.

use std::fs;
use std::path::Path;

use crate::{DocumentError, DocumentResult};

/// Ordered `(number, text)` claims read from plain text.
///
/// A line that starts with a digit and has a `.` within its first four
/// characters starts a new claim (`12. The widget of claim 1, ...`). Every
/// other non-empty line continues the current claim. Lines before the first
/// claim are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSource {
    claims: Vec<(u32, String)>,
}

impl ClaimSource {
    pub fn parse(text: &str) -> DocumentResult<Self> {
        let mut starts: Vec<(usize, String)> = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if starts_claim(line) {
                starts.push((idx + 1, line.to_string()));
            } else if let Some((_, current)) = starts.last_mut() {
                current.push(' ');
                current.push_str(line);
            } else {
                tracing::debug!(line = idx + 1, "skipping text before the first claim");
            }
        }

        if starts.is_empty() {
            return Err(DocumentError::NoClaims);
        }

        let claims = starts
            .into_iter()
            .map(|(line, joined)| split_number(line, &joined))
            .collect::<DocumentResult<Vec<_>>>()?;
        tracing::debug!(claims = claims.len(), "read claims");
        Ok(Self { claims })
    }

    pub fn load(path: &Path) -> DocumentResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| DocumentError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    pub fn claims(&self) -> &[(u32, String)] {
        &self.claims
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.claims.iter().map(|(n, text)| (*n, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn into_claims(self) -> Vec<(u32, String)> {
        self.claims
    }
}

fn starts_claim(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit()) && line.chars().take(4).any(|c| c == '.')
}

fn split_number(line: usize, joined: &str) -> DocumentResult<(u32, String)> {
    let (number, text) = joined.split_once('.').unwrap_or((joined, ""));
    let invalid = || DocumentError::ClaimNumber {
        line,
        number: number.to_string(),
    };
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let number = number.parse::<u32>().map_err(|_| invalid())?;
    Ok((number, text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn joins_continuation_lines() {
        let source = ClaimSource::parse(
            "What is claimed is:\n\n1. A widget comprising:\n   a frame; and\n   a gear.\n\n2. The widget of claim 1,\nwherein the gear is red.\n",
        )
        .unwrap();

        assert_eq!(
            source.claims(),
            &[
                (1, "A widget comprising: a frame; and a gear.".to_string()),
                (2, "The widget of claim 1, wherein the gear is red.".to_string()),
            ]
        );
    }

    #[test]
    fn numbers_must_be_numeric() {
        let err = ClaimSource::parse("1. A widget.\n2a. The widget of claim 1.").unwrap_err();
        assert!(matches!(
            err,
            DocumentError::ClaimNumber { line: 2, ref number } if number == "2a"
        ));
    }

    #[test]
    fn long_numbers_are_not_claims() {
        // The period is too far in to start a claim.
        let source = ClaimSource::parse("1. A widget having a length of\n12345. millimeters.").unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.claims()[0].1, "A widget having a length of 12345. millimeters.");
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            ClaimSource::parse("\n\nWhat is claimed is:\n"),
            Err(DocumentError::NoClaims)
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1. A widget.").unwrap();
        writeln!(file, "2. The widget of claim 1, further comprising a gear.").unwrap();

        let source = ClaimSource::load(file.path()).unwrap();
        let numbers: Vec<u32> = source.iter().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2]);

        let missing = ClaimSource::load(&file.path().with_extension("missing"));
        assert!(matches!(missing, Err(DocumentError::Load { .. })));
    }
}
