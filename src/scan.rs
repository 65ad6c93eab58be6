use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ScanError;
use crate::extract::{self, ExtractStatus, Extraction};
use crate::matcher::Matcher;
use crate::types::{Candidate, ScanProgress, ScanResult};

/// Classify each candidate as matched or unmatched, one file at a time.
///
/// `cancel` is checked before every file; once set, the scan stops with
/// `ScanError::Cancelled` and no partial result. `progress` observes the run
/// and has no influence on the outcome.
pub fn scan(
    candidates: &[Candidate],
    matcher: &Matcher,
    cancel: &AtomicBool,
    progress: impl FnMut(ScanProgress),
) -> Result<ScanResult, ScanError> {
    scan_with(candidates, matcher, cancel, extract::extract_document, progress)
}

/// `scan` with a pluggable extractor.
pub fn scan_with(
    candidates: &[Candidate],
    matcher: &Matcher,
    cancel: &AtomicBool,
    mut extractor: impl FnMut(&std::path::Path) -> Extraction,
    mut progress: impl FnMut(ScanProgress),
) -> Result<ScanResult, ScanError> {
    let total = candidates.len();
    let mut result = ScanResult::default();
    progress(ScanProgress::Started { total });

    for (i, candidate) in candidates.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            tracing::info!(processed = i, total, "scan cancelled");
            return Err(ScanError::Cancelled);
        }

        let extraction = extractor(candidate.path());
        match extraction.status {
            ExtractStatus::Unreadable => result.stats.unreadable += 1,
            ExtractStatus::Read if extraction.text.trim().is_empty() => {
                result.stats.empty_text += 1;
            }
            ExtractStatus::Read => {}
        }
        result.stats.failed_pages += extraction.failed_pages;

        let matched = matcher.is_match(&extraction.text);
        tracing::debug!(path = %candidate.path().display(), matched, pages = extraction.pages, "scanned");

        if matched {
            result.matched.push(candidate.clone());
        } else {
            result.unmatched.push(candidate.clone());
        }

        progress(ScanProgress::FileDone {
            processed: i + 1,
            total,
            path: candidate.path().to_path_buf(),
            matched,
        });
    }

    if result.stats.unreadable > 0 || result.stats.empty_text > 0 {
        tracing::info!(
            unreadable = result.stats.unreadable,
            empty_text = result.stats.empty_text,
            failed_pages = result.stats.failed_pages,
            "documents without extractable text"
        );
    }

    progress(ScanProgress::Finished {
        matched: result.matched.len(),
        unmatched: result.unmatched.len(),
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use crate::types::SearchCriterion;

    fn read(text: &str) -> Extraction {
        Extraction {
            text: text.to_string(),
            status: ExtractStatus::Read,
            pages: 1,
            failed_pages: 0,
        }
    }

    fn unreadable() -> Extraction {
        Extraction {
            text: String::new(),
            status: ExtractStatus::Unreadable,
            pages: 0,
            failed_pages: 0,
        }
    }

    /// a.pdf: "invoice 2023", b.pdf: "contract 2024", c.pdf: corrupt.
    fn corpus() -> (Vec<Candidate>, HashMap<PathBuf, Extraction>) {
        let candidates = vec![
            Candidate::new("D/a.pdf"),
            Candidate::new("D/b.pdf"),
            Candidate::new("D/c.pdf"),
        ];
        let texts = HashMap::from([
            (PathBuf::from("D/a.pdf"), read("invoice 2023")),
            (PathBuf::from("D/b.pdf"), read("contract 2024")),
            (PathBuf::from("D/c.pdf"), unreadable()),
        ]);
        (candidates, texts)
    }

    fn run(criterion: &SearchCriterion) -> ScanResult {
        let (candidates, texts) = corpus();
        let matcher = Matcher::lenient(criterion);
        let cancel = AtomicBool::new(false);
        scan_with(
            &candidates,
            &matcher,
            &cancel,
            |p: &Path| texts[p].clone(),
            |_| {},
        )
        .unwrap()
    }

    #[test]
    fn literal_scenario() {
        let result = run(&SearchCriterion::Literal("2023".into()));
        assert_eq!(result.matched, vec![Candidate::new("D/a.pdf")]);
        assert_eq!(
            result.unmatched,
            vec![Candidate::new("D/b.pdf"), Candidate::new("D/c.pdf")]
        );
        assert_eq!(result.stats.unreadable, 1);
    }

    #[test]
    fn pattern_scenario() {
        let result = run(&SearchCriterion::Pattern(r"\d{4}".into()));
        assert_eq!(
            result.matched,
            vec![Candidate::new("D/a.pdf"), Candidate::new("D/b.pdf")]
        );
        assert_eq!(result.unmatched, vec![Candidate::new("D/c.pdf")]);
    }

    #[test]
    fn invalid_pattern_classifies_everything_unmatched() {
        let result = run(&SearchCriterion::Pattern("(2023".into()));
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched.len(), 3);
    }

    #[test]
    fn every_candidate_classified_exactly_once() {
        let (candidates, _) = corpus();
        for criterion in [
            SearchCriterion::Literal("invoice".into()),
            SearchCriterion::Literal("nothing".into()),
            SearchCriterion::Pattern("20\\d\\d".into()),
        ] {
            let result = run(&criterion);
            assert_eq!(result.total(), candidates.len());
            for c in &candidates {
                let in_matched = result.matched.contains(c);
                let in_unmatched = result.unmatched.contains(c);
                assert!(in_matched ^ in_unmatched, "{c:?} classified wrongly");
            }
        }
    }

    #[test]
    fn progress_reports_each_file_in_order() {
        let (candidates, texts) = corpus();
        let matcher = Matcher::lenient(&SearchCriterion::Literal("2023".into()));
        let cancel = AtomicBool::new(false);
        let mut events = Vec::new();
        scan_with(
            &candidates,
            &matcher,
            &cancel,
            |p: &Path| texts[p].clone(),
            |e| events.push(e),
        )
        .unwrap();

        assert_eq!(events.len(), 5);
        assert_eq!(events[0], ScanProgress::Started { total: 3 });
        let processed: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                ScanProgress::FileDone { processed, .. } => Some(*processed),
                _ => None,
            })
            .collect();
        assert_eq!(processed, vec![1, 2, 3]);
        assert_eq!(
            events[4],
            ScanProgress::Finished {
                matched: 1,
                unmatched: 2
            }
        );
    }

    #[test]
    fn cancellation_stops_between_files() {
        let (candidates, texts) = corpus();
        let matcher = Matcher::lenient(&SearchCriterion::Literal("x".into()));
        let cancel = AtomicBool::new(false);
        let mut seen = 0;
        let err = scan_with(
            &candidates,
            &matcher,
            &cancel,
            |p: &Path| {
                seen += 1;
                cancel.store(true, Ordering::Relaxed);
                texts[p].clone()
            },
            |_| {},
        )
        .unwrap_err();

        assert!(matches!(err, ScanError::Cancelled));
        assert_eq!(seen, 1);
    }

    #[test]
    fn empty_text_is_counted_but_not_an_error() {
        let candidates = vec![Candidate::new("blank.pdf")];
        let matcher = Matcher::lenient(&SearchCriterion::Literal("a".into()));
        let cancel = AtomicBool::new(false);
        let result = scan_with(&candidates, &matcher, &cancel, |_| read("  \n "), |_| {}).unwrap();
        assert_eq!(result.unmatched, candidates);
        assert_eq!(result.stats.empty_text, 1);
    }
}
