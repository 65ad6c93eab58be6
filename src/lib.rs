#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,   // Rust naming conventions
    clippy::missing_errors_doc,        // errors are the ScanError variants, documented there
    clippy::missing_panics_doc,        // same
)]

pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod matcher;
pub mod prompt;
pub mod report;
pub mod scan;
pub mod types;
pub mod walk;

#[cfg(test)]
mod testlog;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use serde::Serialize;

use config::Settings;
use error::ScanError;
use matcher::Matcher;
use report::{ReportOptions, ReportPaths};
use types::{Candidate, ScanProgress, ScanResult, SearchCriterion};

/// What a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub criterion: SearchCriterion,
    pub input: PathBuf,
    pub result: ScanResult,
    pub reports: ReportPaths,
}

/// The whole pipeline: enumerate → extract + match each file → write both reports.
///
/// Fails before writing anything when the input holds no PDFs or the scan is
/// cancelled. A pattern that doesn't compile is not an error here: every file
/// is reported as unmatched.
pub fn run(
    settings: &Settings,
    cancel: &AtomicBool,
    progress: impl FnMut(ScanProgress),
) -> Result<RunOutcome, ScanError> {
    let candidates = walk::enumerate(&settings.input, &settings.walk)?;
    scan_and_report(
        &settings.criterion,
        &settings.input,
        &candidates,
        &settings.report,
        cancel,
        progress,
    )
}

/// Second half of `run`, for callers that already enumerated (the guided prompt).
pub fn scan_and_report(
    criterion: &SearchCriterion,
    input: &std::path::Path,
    candidates: &[Candidate],
    report_opts: &ReportOptions,
    cancel: &AtomicBool,
    progress: impl FnMut(ScanProgress),
) -> Result<RunOutcome, ScanError> {
    let matcher = Matcher::lenient(criterion);
    let result = scan::scan(candidates, &matcher, cancel, progress)?;
    let reports = report::write(&result, report_opts)?;

    tracing::info!(
        candidates = result.total(),
        matched = result.matched.len(),
        unmatched = result.unmatched.len(),
        "scan complete"
    );

    Ok(RunOutcome {
        criterion: criterion.clone(),
        input: input.to_path_buf(),
        result,
        reports,
    })
}
