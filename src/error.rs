use std::path::PathBuf;

/// Every error pdfscan can surface. Per-file extraction problems are not here:
/// they are recovered inside the extractor and only show up in `ScanStats`.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("invalid input {}: {reason}", .path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error("no PDF files found in {}{}", .path.display(), depth_note(.recursive))]
    NoCandidates { path: PathBuf, recursive: bool },

    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("search string is empty")]
    EmptyCriterion,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error in {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("scan cancelled")]
    Cancelled,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // thiserror hands fields over by reference
fn depth_note(recursive: &bool) -> &'static str {
    if *recursive {
        " (including subdirectories)"
    } else {
        ""
    }
}

impl ScanError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput { .. } | Self::NoCandidates { .. } | Self::Io { .. } => 2,
            Self::InvalidPattern { .. } | Self::EmptyCriterion | Self::Config { .. } => 3,
            Self::Cancelled => 130,
        }
    }

    /// True when an interactive caller should ask for another path instead of giving up.
    #[must_use]
    pub fn is_retryable_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::NoCandidates { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        let input = ScanError::InvalidInput {
            path: PathBuf::from("x"),
            reason: "not a PDF".into(),
        };
        assert_eq!(input.exit_code(), 2);
        assert_eq!(ScanError::EmptyCriterion.exit_code(), 3);
        assert_eq!(ScanError::Cancelled.exit_code(), 130);
    }

    #[test]
    fn no_candidates_message_mentions_subdirectories_when_recursive() {
        let deep = ScanError::NoCandidates {
            path: PathBuf::from("docs"),
            recursive: true,
        };
        let shallow = ScanError::NoCandidates {
            path: PathBuf::from("docs"),
            recursive: false,
        };
        assert_eq!(
            deep.to_string(),
            "no PDF files found in docs (including subdirectories)"
        );
        assert_eq!(shallow.to_string(), "no PDF files found in docs");
        assert!(deep.is_retryable_input());
        assert!(!ScanError::EmptyCriterion.is_retryable_input());
    }
}
