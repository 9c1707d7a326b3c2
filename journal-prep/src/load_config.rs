//! `load_config` module: loads a YAML config file and adapts it into the core
//! [`PrepareConfig`].
//!
//! This is the only place where user-supplied YAML is parsed and mapped to
//! the strongly-typed core structs.
//!
//! # Responsibilities
//! - Parse the YAML file into the intermediate section types below
//! - Expand `preset` names into full section layouts, applying per-key overrides
//! - Resolve relative paths against the config file's directory, or against
//!   `JOURNAL_PREP_BASE_DIR` when that environment variable is set
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.
//!
//! ```yaml
//! rename:
//!   - source_dir: files/journal-past
//! combine:
//!   - source_dir: files/journal-past
//!     output: combine/journal-past.md
//!     preset: journal-past
//!   - source_dir: files/journal-app
//!     output: combine/journal-app.txt
//!     preset: journal-app
//!     include_banner: false
//! ```

use anyhow::Result;
use journal_prep_core::config::{
    CombineConfig, LayoutPreset, RenameConfig, DEFAULT_EXTENSION,
};
use journal_prep_core::prepare::PrepareConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const BASE_DIR_ENV: &str = "JOURNAL_PREP_BASE_DIR";

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub rename: Vec<RenameSection>,
    #[serde(default)]
    pub combine: Vec<CombineSection>,
}

#[derive(Debug, Deserialize)]
pub struct RenameSection {
    pub source_dir: PathBuf,
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CombineSection {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub preset: Option<LayoutPreset>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub date_format: Option<String>,
    #[serde(default)]
    pub header_template: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub include_banner: Option<bool>,
}

impl CombineSection {
    fn into_config(self, base: &Path) -> CombineConfig {
        let preset = self.preset.unwrap_or(LayoutPreset::JournalPast);
        let mut config = CombineConfig::from_preset(
            preset,
            resolve(base, self.source_dir),
            resolve(base, self.output),
        );
        if self.extension.is_some() {
            config.extension = self.extension;
        }
        if let Some(format) = self.date_format {
            config.layout.date_format = format;
        }
        if let Some(template) = self.header_template {
            config.layout.header_template = template;
        }
        if self.banner.is_some() {
            config.layout.banner = self.banner;
        }
        if self.include_banner == Some(false) {
            config.layout.banner = None;
        }
        config
    }
}

/// Loads a YAML config file and returns the resolved core config.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PrepareConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: CliConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let base = base_dir(path_ref);
    info!(base_dir = %base.display(), "Resolving relative paths");

    let config = PrepareConfig {
        rename: raw
            .rename
            .into_iter()
            .map(|r| RenameConfig {
                source_dir: resolve(&base, r.source_dir),
                extension: r.extension.unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            })
            .collect(),
        combine: raw
            .combine
            .into_iter()
            .map(|c| c.into_config(&base))
            .collect(),
    };

    for combine in &config.combine {
        if let Err(e) = combine.layout.validate() {
            error!(error = %e, output = %combine.output.display(), "Invalid combine layout in config");
            anyhow::bail!("Invalid combine section for {}: {e}", combine.output.display());
        }
    }

    config.trace_loaded();
    Ok(config)
}

fn base_dir(config_path: &Path) -> PathBuf {
    if let Ok(dir) = std::env::var(BASE_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
