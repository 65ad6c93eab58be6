use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use grep_searcher::SearcherBuilder;
use grep_searcher::sinks::UTF8;

use crate::error::ScanError;
use crate::types::SearchCriterion;

/// A compiled, case-insensitive search criterion.
///
/// Literal text is escaped and run through the same regex engine as patterns,
/// so both modes share one code path. `Never` stands in for a pattern that
/// failed to compile: it classifies everything as unmatched.
#[derive(Debug)]
pub enum Matcher {
    Regex(RegexMatcher),
    Never,
}

impl Matcher {
    /// Compile strictly. Use this where a bad pattern should be reported to the user.
    pub fn compile(criterion: &SearchCriterion) -> Result<Self, ScanError> {
        let pattern = match criterion {
            SearchCriterion::Literal(text) => regex_syntax::escape(text),
            SearchCriterion::Pattern(pattern) => pattern.clone(),
        };

        RegexMatcherBuilder::new()
            .case_insensitive(true)
            .build(&pattern)
            .map(Self::Regex)
            .map_err(|e| ScanError::InvalidPattern {
                pattern: criterion.text().to_string(),
                reason: e.to_string(),
            })
    }

    /// Compile, falling back to a never-matching matcher on a bad pattern.
    /// Reporting the bad pattern is the caller's job (see `compile`).
    #[must_use]
    pub fn lenient(criterion: &SearchCriterion) -> Self {
        match Self::compile(criterion) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(error = %e, "pattern will not match any file");
                Self::Never
            }
        }
    }

    /// Does `text` contain a match anywhere? Empty text never matches.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        let Self::Regex(matcher) = self else {
            return false;
        };
        if text.is_empty() {
            return false;
        }

        // Multi-line so a pattern may span the page/line breaks in extracted text.
        let mut searcher = SearcherBuilder::new().multi_line(true).build();
        let mut found = false;
        let _ = searcher.search_slice(
            matcher,
            text.as_bytes(),
            UTF8(|_, _| {
                found = true;
                Ok(false)
            }),
        );
        found
    }
}

/// One-shot convenience: compile `criterion` leniently and test `text`.
#[must_use]
pub fn matches(text: &str, criterion: &SearchCriterion) -> bool {
    Matcher::lenient(criterion).is_match(text)
}
