use std::path::{Path, PathBuf};

use serde::Serialize;

/// How the search text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Literal,
    Pattern,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Pattern => write!(f, "regex"),
        }
    }
}

/// What to look for. Always matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "text", rename_all = "lowercase")]
pub enum SearchCriterion {
    Literal(String),
    Pattern(String),
}

impl SearchCriterion {
    /// Build a criterion from user text. Surrounding whitespace is dropped;
    /// an empty result is rejected.
    pub fn new(text: &str, mode: MatchMode) -> Result<Self, crate::error::ScanError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(crate::error::ScanError::EmptyCriterion);
        }
        Ok(match mode {
            MatchMode::Literal => Self::Literal(text.to_string()),
            MatchMode::Pattern => Self::Pattern(text.to_string()),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Pattern(s) => s,
        }
    }

    #[must_use]
    pub fn mode(&self) -> MatchMode {
        match self {
            Self::Literal(_) => MatchMode::Literal,
            Self::Pattern(_) => MatchMode::Pattern,
        }
    }
}

/// A path believed to be a PDF, judged by extension only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Candidate(PathBuf);

impl Candidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for Candidate {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Diagnostics gathered while scanning. Never affects classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Documents that could not be opened or parsed at all.
    pub unreadable: usize,
    /// Documents that opened but produced no text (scanned images, empty pages).
    pub empty_text: usize,
    /// Individual pages whose extraction failed inside otherwise readable documents.
    pub failed_pages: usize,
}

/// Every candidate lands in exactly one of the two lists, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub matched: Vec<Candidate>,
    pub unmatched: Vec<Candidate>,
    pub stats: ScanStats,
}

impl ScanResult {
    #[must_use]
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }
}

/// Progress events emitted by the scan driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanProgress {
    Started {
        total: usize,
    },
    FileDone {
        processed: usize,
        total: usize,
        path: PathBuf,
        matched: bool,
    },
    Finished {
        matched: usize,
        unmatched: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn criterion_rejects_blank_text() {
        assert!(matches!(
            SearchCriterion::new("   ", MatchMode::Literal),
            Err(ScanError::EmptyCriterion)
        ));
        assert!(matches!(
            SearchCriterion::new("", MatchMode::Pattern),
            Err(ScanError::EmptyCriterion)
        ));
    }

    #[test]
    fn criterion_trims_and_keeps_mode() {
        let c = SearchCriterion::new("  invoice ", MatchMode::Pattern).unwrap();
        assert_eq!(c, SearchCriterion::Pattern("invoice".into()));
        assert_eq!(c.text(), "invoice");
        assert_eq!(c.mode(), MatchMode::Pattern);
    }
}
