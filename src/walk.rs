use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::error::ScanError;
use crate::types::Candidate;

/// How a directory input is traversed.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Descend into subdirectories. `false` looks at immediate children only.
    pub recursive: bool,
    pub follow_links: bool,
    /// Globs matched against the file name and the path relative to the root.
    pub exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_links: false,
            exclude: Vec::new(),
        }
    }
}

/// Case-insensitive `.pdf` suffix check on the file name. Works on non-UTF-8 names.
#[must_use]
pub fn is_pdf_path(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        let bytes = name.as_encoded_bytes();
        bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".pdf")
    })
}

/// Resolve `input` to the PDFs to scan.
///
/// A `.pdf` file yields itself. A directory yields every `.pdf` beneath it
/// (or directly in it when not recursive), sorted by name within each directory.
/// Anything else, including a directory with no PDFs, is an error the caller
/// can recover from by asking for another path.
pub fn enumerate(input: &Path, opts: &WalkOptions) -> Result<Vec<Candidate>, ScanError> {
    if input.is_file() {
        if is_pdf_path(input) {
            return Ok(vec![Candidate::new(input)]);
        }
        return Err(ScanError::InvalidInput {
            path: input.to_path_buf(),
            reason: "not a PDF file".into(),
        });
    }

    if !input.is_dir() {
        return Err(ScanError::InvalidInput {
            path: input.to_path_buf(),
            reason: "no such file or directory".into(),
        });
    }

    let excludes = build_excludes(&opts.exclude)?;
    let candidates = walk_dir(input, opts, excludes);

    if candidates.is_empty() {
        return Err(ScanError::NoCandidates {
            path: input.to_path_buf(),
            recursive: opts.recursive,
        });
    }
    tracing::debug!(root = %input.display(), found = candidates.len(), "enumerated PDFs");
    Ok(candidates)
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidPattern {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}

/// Sequential walk: every file is visited, hidden and gitignored ones included.
fn walk_dir(root: &Path, opts: &WalkOptions, excludes: GlobSet) -> Vec<Candidate> {
    let filter_root = root.to_path_buf();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .follow_links(opts.follow_links)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if excludes.is_empty() || entry.depth() == 0 {
                return true;
            }
            let path = entry.path();
            let rel = path.strip_prefix(&filter_root).unwrap_or(path);
            !(excludes.is_match(entry.file_name()) || excludes.is_match(rel))
        });
    if !opts.recursive {
        builder.max_depth(Some(1));
    }

    let mut out = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let is_file = entry.file_type().is_some_and(|ft| {
            ft.is_file() || (ft.is_symlink() && entry.path().is_file())
        });
        if is_file && is_pdf_path(entry.path()) {
            out.push(Candidate::new(entry.into_path()));
        }
    }
    out
}
