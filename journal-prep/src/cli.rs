//! This module implements the CLI interface for journal-prep: command parsing,
//! argument validation, the async entrypoint and user-visible output.
//!
//! All pipeline logic (name parsing, renaming, combining, tools) lives in the
//! [`journal-prep-core`] crate. This module is strictly CLI glue.
//!
//! ## How To Use
//! - For command-line users: use the installed `journal-prep` binary with `--help`.
//! - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
//!
//! [`journal-prep-core`]: ../../journal-prep-core/
//! [`Cli`]: struct.Cli.html
//! [`run`]: fn.run.html

use crate::load_config::load_config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use journal_prep_core::combine::{combine_dir, CombineReport};
use journal_prep_core::config::{CombineConfig, LayoutPreset, RenameConfig};
use journal_prep_core::contract::ToolBox;
use journal_prep_core::file_tool::{FileTool, FILE_TOOL_NAME};
use journal_prep_core::prepare::prepare;
use journal_prep_core::rename::{rename_dir, RenameReport};
use serde::Serialize;
use std::path::PathBuf;

/// CLI for journal-prep: normalise and combine dated health journals.
#[derive(Parser)]
#[clap(
    name = "journal-prep",
    version,
    about = "Normalise and combine dated health journal files for LLM agents to read"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rename legacy `YYYY-Mon-DD*.md` files to `DD-MM-YYYY.md` in place
    Rename {
        /// Directory holding the journal files
        #[clap(long)]
        dir: PathBuf,
        /// Extension of the files to rename
        #[clap(long, default_value = "md")]
        extension: String,
        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },
    /// Combine `DD-MM-YYYY` files into one date-ordered document
    Combine {
        /// Directory holding the canonically named files
        #[clap(long)]
        dir: PathBuf,
        /// Output document, overwritten on every run
        #[clap(long)]
        output: PathBuf,
        /// Document style: journal-past or journal-app
        #[clap(long, default_value = "journal-past")]
        preset: LayoutPreset,
        /// Only accept exact `DD-MM-YYYY.<EXTENSION>` names
        #[clap(long)]
        extension: Option<String>,
        /// strftime format for section dates, e.g. "%B %d, %Y"
        #[clap(long)]
        date_format: Option<String>,
        /// First line of the document
        #[clap(long, conflicts_with = "no_banner")]
        banner: Option<String>,
        /// Omit the preset's banner
        #[clap(long)]
        no_banner: bool,
        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },
    /// Run every rename and combine step from a YAML config file
    Prepare {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Print the report as JSON
        #[clap(long)]
        json: bool,
    },
    /// Read a combined document the way an agent's File_Tool does
    Read {
        /// Directory of combined documents
        #[clap(long)]
        root: PathBuf,
        /// File name inside the root, e.g. journal-app.txt
        filename: String,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Rename {
            dir,
            extension,
            json,
        } => {
            let config = RenameConfig {
                source_dir: dir,
                extension,
            };
            config.trace_loaded();
            let report = rename_dir(&config)?;
            if json {
                print_json(&report)?;
            } else {
                print_rename(&report);
            }
            Ok(())
        }
        Commands::Combine {
            dir,
            output,
            preset,
            extension,
            date_format,
            banner,
            no_banner,
            json,
        } => {
            let mut config = CombineConfig::from_preset(preset, dir, output);
            if extension.is_some() {
                config.extension = extension;
            }
            if let Some(format) = date_format {
                config.layout.date_format = format;
            }
            if banner.is_some() || no_banner {
                config.layout.banner = banner;
            }
            config.trace_loaded();
            let report = combine_dir(&config)?;
            if json {
                print_json(&report)?;
            } else {
                print_combine(&report);
            }
            Ok(())
        }
        Commands::Prepare { config, json } => {
            let config = load_config(config)?;
            tracing::info!(command = "prepare", "Starting journal preparation");
            let report = prepare(&config)?;
            if json {
                print_json(&report)?;
            } else {
                report.renames.iter().for_each(print_rename);
                report.combines.iter().for_each(print_combine);
            }
            Ok(())
        }
        Commands::Read { root, filename } => {
            let mut toolbox = ToolBox::new();
            toolbox.register(Box::new(FileTool::new(root)));
            let output = toolbox
                .invoke(FILE_TOOL_NAME, serde_json::json!({ "filename": filename }))
                .await?;
            println!("{output}");
            Ok(())
        }
    }
}

fn print_rename(report: &RenameReport) {
    for failure in &report.failures {
        eprintln!("Error renaming {}: {}", failure.file_name, failure.reason);
    }
    println!("Completed");
}

fn print_combine(report: &CombineReport) {
    for skipped in &report.skipped {
        eprintln!("Error reading {}: {}", skipped.file_name, skipped.reason);
    }
    println!(
        "combine {} into {}",
        report.combined,
        report.output_path.display()
    );
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialise report")?;
    println!("{json}");
    Ok(())
}
