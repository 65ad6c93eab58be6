use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::report::ReportOptions;
use crate::types::{MatchMode, SearchCriterion};
use crate::walk::WalkOptions;

/// Project-local config picked up from the working directory.
pub const LOCAL_CONFIG_NAME: &str = ".pdfscan.toml";

/// On-disk TOML configuration. All fields are optional so partial configs
/// layer over each other and over the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub recursive: Option<bool>,
    pub regex: Option<bool>,
    pub follow_links: Option<bool>,
    pub exclude: Option<Vec<String>>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub output_dir: Option<PathBuf>,
    pub matched_name: Option<String>,
    pub unmatched_name: Option<String>,
}

/// Load `./.pdfscan.toml`, then overlay `explicit` if given.
///
/// A broken local file is logged and skipped; a broken explicit file is an error,
/// since the user asked for it by name.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile, ScanError> {
    let local_path = PathBuf::from(LOCAL_CONFIG_NAME);
    let local = if local_path.is_file() {
        match load_from_path(&local_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring local config");
                ConfigFile::default()
            }
        }
    } else {
        ConfigFile::default()
    };

    match explicit {
        Some(path) => Ok(merge(local, load_from_path(path)?)),
        None => Ok(local),
    }
}

/// Parse a config file.
pub fn load_from_path(path: &Path) -> Result<ConfigFile, ScanError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ScanError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
#[must_use]
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let report = match (base.report, overlay.report) {
        (None, None) => None,
        (b, o) => {
            let b = b.unwrap_or_default();
            let o = o.unwrap_or_default();
            Some(ReportConfig {
                output_dir: o.output_dir.or(b.output_dir),
                matched_name: o.matched_name.or(b.matched_name),
                unmatched_name: o.unmatched_name.or(b.unmatched_name),
            })
        }
    };

    ConfigFile {
        recursive: overlay.recursive.or(base.recursive),
        regex: overlay.regex.or(base.regex),
        follow_links: overlay.follow_links.or(base.follow_links),
        exclude: overlay.exclude.or(base.exclude),
        report,
    }
}

impl ConfigFile {
    #[must_use]
    pub fn match_mode(&self) -> MatchMode {
        if self.regex.unwrap_or(false) {
            MatchMode::Pattern
        } else {
            MatchMode::Literal
        }
    }

    #[must_use]
    pub fn walk_options(&self) -> WalkOptions {
        let defaults = WalkOptions::default();
        WalkOptions {
            recursive: self.recursive.unwrap_or(defaults.recursive),
            follow_links: self.follow_links.unwrap_or(defaults.follow_links),
            exclude: self.exclude.clone().unwrap_or(defaults.exclude),
        }
    }

    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        let defaults = ReportOptions::default();
        let Some(report) = &self.report else {
            return defaults;
        };
        ReportOptions {
            output_dir: report.output_dir.clone().unwrap_or(defaults.output_dir),
            matched_name: report.matched_name.clone().unwrap_or(defaults.matched_name),
            unmatched_name: report
                .unmatched_name
                .clone()
                .unwrap_or(defaults.unmatched_name),
        }
    }
}

/// Everything one run needs, after config files and CLI flags are resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    pub criterion: SearchCriterion,
    pub input: PathBuf,
    pub walk: WalkOptions,
    pub report: ReportOptions,
}
