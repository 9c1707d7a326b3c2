//! Renames legacy journal exports (`2024-Feb-10-notes.md`) to canonical
//! `DD-MM-YYYY.md` names in place.
//!
//! The run aborts only when the directory itself is unusable. Files whose
//! month abbreviation is unknown, or whose canonical name is already taken,
//! are left untouched and listed in [`RenameReport::failures`]. Re-running
//! after a successful pass is a no-op because canonical names no longer
//! match the legacy pattern.

use serde::Serialize;
use std::fs;
use tracing::{debug, error, info, warn};

use crate::config::RenameConfig;
use crate::dated_file::LegacyPattern;
use crate::error::{JournalError, RenameFailureReason, Result};

#[derive(Debug, Clone, Default, Serialize)]
pub struct RenameReport {
    /// Entries inspected in the directory, matching or not.
    pub considered: usize,
    pub renamed: Vec<RenamedFile>,
    pub failures: Vec<RenameFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamedFile {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameFailure {
    pub file_name: String,
    pub reason: RenameFailureReason,
}

pub fn rename_dir(config: &RenameConfig) -> Result<RenameReport> {
    let dir = &config.source_dir;
    if !dir.is_dir() {
        error!(dir = %dir.display(), "Rename source directory not found");
        return Err(JournalError::DirectoryNotFound(dir.clone()));
    }
    info!(dir = %dir.display(), extension = %config.extension, "Starting rename pass");

    let pattern = LegacyPattern::new(&config.extension)?;
    let mut names = list_file_names(dir)?;
    names.sort();

    let mut report = RenameReport {
        considered: names.len(),
        ..RenameReport::default()
    };

    for file_name in names {
        let Some(legacy) = pattern.parse(&file_name) else {
            debug!(file = %file_name, "Not a legacy name, leaving as is");
            continue;
        };

        let target_name = match legacy.canonical_name() {
            Ok(name) => name,
            Err(reason) => {
                error!(file = %file_name, %reason, "Cannot rename file");
                report.failures.push(RenameFailure { file_name, reason });
                continue;
            }
        };

        let source = dir.join(&file_name);
        let target = dir.join(&target_name);
        if target.exists() {
            warn!(file = %file_name, target = %target_name, "Canonical name already taken");
            report.failures.push(RenameFailure {
                file_name,
                reason: RenameFailureReason::TargetExists {
                    target: target_name,
                },
            });
            continue;
        }

        match fs::rename(&source, &target) {
            Ok(()) => {
                info!(from = %file_name, to = %target_name, "Renamed journal file");
                report.renamed.push(RenamedFile {
                    from: file_name,
                    to: target_name,
                });
            }
            Err(e) => {
                error!(error = ?e, file = %file_name, "Failed to move file");
                report.failures.push(RenameFailure {
                    file_name,
                    reason: RenameFailureReason::Io {
                        message: e.to_string(),
                    },
                });
            }
        }
    }

    info!(
        considered = report.considered,
        renamed = report.renamed.len(),
        failed = report.failures.len(),
        "Rename pass complete"
    );
    Ok(report)
}

/// Names of the regular files directly inside `dir`.
pub(crate) fn list_file_names(dir: &std::path::Path) -> Result<Vec<String>> {
    let read_dir_err = |source| JournalError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "Skipping non UTF-8 file name"),
        }
    }
    Ok(names)
}
