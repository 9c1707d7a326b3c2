//! Combines canonically named journal files into a single date-ordered
//! document that LLM agents read as plain text.
//!
//! Document shape:
//!
//! ```text
//! <banner>            (optional)
//!
//! ==January 15 2024==
//!
//! <verbatim content of 15-01-2024.md>
//!
//! ==March 01 2024==
//! ...
//! ```
//!
//! Sections are assembled in memory and the document is written to a
//! temporary file next to the output, then persisted over it. A file that
//! cannot be read drops out with its header, and readers never observe a
//! half-written document.

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::CombineConfig;
use crate::dated_file::{CanonicalPattern, DatedFile, NameMatch};
use crate::error::{JournalError, Result};
use crate::rename::list_file_names;

#[derive(Debug, Clone, Serialize)]
pub struct CombineReport {
    pub output_path: PathBuf,
    /// Number of sections written.
    pub combined: usize,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: String,
}

pub fn combine_dir(config: &CombineConfig) -> Result<CombineReport> {
    let dir = &config.source_dir;
    if !dir.is_dir() {
        error!(dir = %dir.display(), "Combine source directory not found");
        return Err(JournalError::DirectoryNotFound(dir.clone()));
    }
    config.layout.validate()?;
    info!(
        dir = %dir.display(),
        output = %config.output.display(),
        "Starting combine pass"
    );

    let pattern = CanonicalPattern::new(config.extension.as_deref())?;
    let mut skipped = Vec::new();
    let files = collect_dated_files(dir, &pattern, &mut skipped)?;
    ensure_output_is_not_an_input(&config.output, &files)?;

    let mut document = String::new();
    if let Some(banner) = &config.layout.banner {
        document.push_str(banner);
        document.push_str("\n\n");
    }

    let mut combined = 0;
    for file in &files {
        let header = config.layout.header(file.date)?;
        match read_section(file, &header) {
            Ok(section) => {
                document.push_str(&section);
                combined += 1;
            }
            Err(e) => {
                error!(file = %file.file_name, error = %e, "Error reading journal file");
                skipped.push(SkippedFile {
                    file_name: file.file_name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    write_atomically(&config.output, document.as_bytes())?;

    info!(
        combined,
        skipped = skipped.len(),
        output = %config.output.display(),
        "Combine pass complete"
    );
    Ok(CombineReport {
        output_path: config.output.clone(),
        combined,
        skipped,
    })
}

/// Dated files in `dir`, ordered by date then file name.
pub(crate) fn collect_dated_files(
    dir: &Path,
    pattern: &CanonicalPattern,
    skipped: &mut Vec<SkippedFile>,
) -> Result<Vec<DatedFile>> {
    let mut files = Vec::new();
    for file_name in list_file_names(dir)? {
        match pattern.parse(&file_name) {
            NameMatch::Date(date) => files.push(DatedFile {
                path: dir.join(&file_name),
                file_name,
                date,
            }),
            NameMatch::InvalidDate => {
                warn!(file = %file_name, "Name is not a calendar date, skipping");
                skipped.push(SkippedFile {
                    file_name,
                    reason: "name is not a calendar date".to_string(),
                });
            }
            NameMatch::NoMatch => debug!(file = %file_name, "Not a dated file, ignoring"),
        }
    }
    files.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    Ok(files)
}

fn read_section(file: &DatedFile, header: &str) -> std::io::Result<String> {
    let bytes = fs::read(&file.path)?;
    let content = String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(format!("{header}\n\n{content}\n\n"))
}

fn ensure_output_is_not_an_input(output: &Path, files: &[DatedFile]) -> Result<()> {
    // An output that doesn't exist yet can't be one of the inputs.
    let Ok(output) = output.canonicalize() else {
        return Ok(());
    };
    for file in files {
        if file.path.canonicalize().ok().as_deref() == Some(output.as_path()) {
            error!(output = %output.display(), "Output path is one of the input files");
            return Err(JournalError::OutputCollidesWithInput(output));
        }
    }
    Ok(())
}

fn write_atomically(output: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source| JournalError::OutputWrite {
        path: output.to_path_buf(),
        source,
    };
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;
    debug!(output = %output.display(), bytes = contents.len(), "Wrote combined document");
    Ok(())
}
