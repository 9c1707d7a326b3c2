//! High-level pipeline: rename → combine for every configured journal.
//!
//! Runs all rename passes first so the combine passes see canonical names,
//! then builds each combined document. Directory-level failures stop the
//! run at the failing step; per-file problems are carried in the reports.
//!
//! # Navigation
//! - Main entrypoint: [`prepare`]
//! - Supporting types: [`PrepareConfig`], [`PrepareReport`].

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::combine::{combine_dir, CombineReport};
use crate::config::{CombineConfig, RenameConfig};
use crate::error::Result;
use crate::rename::{rename_dir, RenameReport};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrepareConfig {
    #[serde(default)]
    pub rename: Vec<RenameConfig>,
    #[serde(default)]
    pub combine: Vec<CombineConfig>,
}

impl PrepareConfig {
    pub fn trace_loaded(&self) {
        info!(
            renames = self.rename.len(),
            combines = self.combine.len(),
            "Loaded prepare config"
        );
        self.rename.iter().for_each(RenameConfig::trace_loaded);
        self.combine.iter().for_each(CombineConfig::trace_loaded);
    }
}

#[derive(Debug, Default, Serialize)]
pub struct PrepareReport {
    pub renames: Vec<RenameReport>,
    pub combines: Vec<CombineReport>,
}

pub fn prepare(config: &PrepareConfig) -> Result<PrepareReport> {
    info!("[PREPARE] Starting journal preparation");
    let mut report = PrepareReport::default();

    for rename in &config.rename {
        info!(dir = %rename.source_dir.display(), "[PREPARE] Renaming legacy files");
        match rename_dir(rename) {
            Ok(r) => report.renames.push(r),
            Err(e) => {
                error!(error = %e, "[PREPARE][ERROR] Rename step failed");
                return Err(e);
            }
        }
    }

    for combine in &config.combine {
        info!(
            dir = %combine.source_dir.display(),
            output = %combine.output.display(),
            "[PREPARE] Combining journal"
        );
        match combine_dir(combine) {
            Ok(r) => report.combines.push(r),
            Err(e) => {
                error!(error = %e, "[PREPARE][ERROR] Combine step failed");
                return Err(e);
            }
        }
    }

    info!(
        renames = report.renames.len(),
        combines = report.combines.len(),
        "[PREPARE] Journal preparation complete"
    );
    Ok(report)
}
