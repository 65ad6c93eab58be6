use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ScanError;
use crate::types::{Candidate, ScanResult};

pub const DEFAULT_MATCHED_NAME: &str = "files-with-match.txt";
pub const DEFAULT_UNMATCHED_NAME: &str = "files-without-match.txt";

/// Where the two reports go.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    pub matched_name: String,
    pub unmatched_name: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            matched_name: DEFAULT_MATCHED_NAME.into(),
            unmatched_name: DEFAULT_UNMATCHED_NAME.into(),
        }
    }
}

/// Locations of the reports written by `write`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPaths {
    pub matched: PathBuf,
    pub unmatched: PathBuf,
}

/// Write matched and unmatched paths, one per line, replacing any existing reports.
/// Both files are always written, even when one list is empty.
pub fn write(result: &ScanResult, opts: &ReportOptions) -> Result<ReportPaths, ScanError> {
    fs::create_dir_all(&opts.output_dir).map_err(|source| ScanError::Io {
        path: opts.output_dir.clone(),
        source,
    })?;

    let paths = ReportPaths {
        matched: opts.output_dir.join(&opts.matched_name),
        unmatched: opts.output_dir.join(&opts.unmatched_name),
    };

    // Both lists are staged first so a failed write leaves the old pair untouched.
    let staged_matched = staging_path(&paths.matched);
    let staged_unmatched = staging_path(&paths.unmatched);
    let staged = write_list(&staged_matched, &result.matched)
        .and_then(|()| write_list(&staged_unmatched, &result.unmatched));
    if let Err(e) = staged {
        let _ = fs::remove_file(&staged_matched);
        let _ = fs::remove_file(&staged_unmatched);
        return Err(e);
    }

    promote(&staged_matched, &paths.matched)?;
    promote(&staged_unmatched, &paths.unmatched)?;
    tracing::debug!(
        matched = %paths.matched.display(),
        unmatched = %paths.unmatched.display(),
        "reports written"
    );
    Ok(paths)
}

/// Sibling of `path` the report is written to before being renamed into place.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn promote(staged: &Path, target: &Path) -> Result<(), ScanError> {
    fs::rename(staged, target).map_err(|source| {
        let _ = fs::remove_file(staged);
        ScanError::Io {
            path: target.to_path_buf(),
            source,
        }
    })
}

fn write_list(path: &Path, entries: &[Candidate]) -> Result<(), ScanError> {
    let io_err = |source: std::io::Error| ScanError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    for entry in entries {
        // Non-UTF-8 path bytes are replaced so the report stays valid UTF-8.
        let line = entry.path().to_string_lossy();
        if let Cow::Owned(_) = line {
            tracing::debug!(path = ?entry.path(), "non-UTF-8 path written with replacement characters");
        }
        writeln!(out, "{line}").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Read a report back into its list of paths. Blank lines are skipped.
pub fn read(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect())
}
