//! Error types shared by the rename and combine pipelines.
//!
//! Only run-level failures are errors. Problems with a single file (an
//! unknown month abbreviation, an unreadable entry) are collected into the
//! pipeline reports instead, so one bad file never aborts a batch.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JournalError>;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Dir not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to list directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output {} is also one of the input files", .0.display())]
    OutputCollidesWithInput(PathBuf),

    #[error("Invalid section layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Why a single file could not be renamed.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenameFailureReason {
    #[error("unknown month abbreviation '{abbreviation}'")]
    UnknownMonthAbbreviation { abbreviation: String },

    #[error("target {target} already exists")]
    TargetExists { target: String },

    #[error("move failed: {message}")]
    Io { message: String },
}
