use std::fmt::Write;

use crate::RunOutcome;
use crate::error::ScanError;

/// Line shown once enumeration is done: `PDFs found: N (recursive)`.
pub fn found_line(total: usize, recursive: bool) -> String {
    let scope = if recursive { "recursive" } else { "top level only" };
    format!("PDFs found: {total} ({scope})")
}

/// Shown once, as soon as a search text fails to compile.
pub fn invalid_pattern_warning(error: &ScanError) -> String {
    format!("⚠ {error}. No file will match; both reports are still written.")
}

/// End-of-run summary: counts and where each list was written.
pub fn summary(outcome: &RunOutcome) -> String {
    let result = &outcome.result;
    let mut out = String::from("— Result —");
    let _ = write!(
        out,
        "\n✔ Files containing \"{}\": {} → {}",
        outcome.criterion.text(),
        result.matched.len(),
        outcome.reports.matched.display()
    );
    let _ = write!(
        out,
        "\n✘ Files not containing it: {} → {}",
        result.unmatched.len(),
        outcome.reports.unmatched.display()
    );

    let stats = result.stats;
    if stats.unreadable > 0 || stats.empty_text > 0 {
        let _ = write!(
            out,
            "\n  ({} unreadable, {} without extractable text)",
            stats.unreadable, stats.empty_text
        );
    }
    out
}

/// Machine-readable summary for `--json`.
pub fn json(outcome: &RunOutcome) -> serde_json::Value {
    serde_json::json!({
        "criterion": outcome.criterion,
        "input": outcome.input,
        "candidates": outcome.result.total(),
        "matched": outcome.result.matched,
        "unmatched": outcome.result.unmatched,
        "stats": outcome.result.stats,
        "reports": outcome.reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::report::ReportPaths;
    use crate::types::{Candidate, ScanResult, ScanStats, SearchCriterion};

    fn outcome(stats: ScanStats) -> RunOutcome {
        RunOutcome {
            criterion: SearchCriterion::Literal("2023".into()),
            input: PathBuf::from("D"),
            result: ScanResult {
                matched: vec![Candidate::new("D/a.pdf")],
                unmatched: vec![Candidate::new("D/b.pdf"), Candidate::new("D/c.pdf")],
                stats,
            },
            reports: ReportPaths {
                matched: PathBuf::from("yes.txt"),
                unmatched: PathBuf::from("no.txt"),
            },
        }
    }

    #[test]
    fn summary_lists_counts_and_locations() {
        let s = summary(&outcome(ScanStats::default()));
        assert!(s.contains("Files containing \"2023\": 1 → yes.txt"));
        assert!(s.contains("Files not containing it: 2 → no.txt"));
        assert!(!s.contains("unreadable"));
    }

    #[test]
    fn summary_mentions_unreadable_documents() {
        let s = summary(&outcome(ScanStats {
            unreadable: 1,
            ..ScanStats::default()
        }));
        assert!(s.contains("1 unreadable, 0 without extractable text"));
    }

    #[test]
    fn json_shape() {
        let v = json(&outcome(ScanStats::default()));
        assert_eq!(v["criterion"]["mode"], "literal");
        assert_eq!(v["criterion"]["text"], "2023");
        assert_eq!(v["candidates"], 3);
        assert_eq!(v["matched"][0], "D/a.pdf");
        assert_eq!(v["reports"]["unmatched"], "no.txt");
    }

    #[test]
    fn found_line_mentions_depth() {
        assert_eq!(found_line(4, true), "PDFs found: 4 (recursive)");
        assert_eq!(found_line(1, false), "PDFs found: 1 (top level only)");
    }
}
