#![doc = "journal-prep-core: core logic library for journal-prep."]

//! This crate contains the data model and pipelines that turn a folder of
//! dated health journal files into combined documents for LLM agents.
//!
//! # Usage
//! - [`rename::rename_dir`] normalises legacy names to `DD-MM-YYYY`.
//! - [`combine::combine_dir`] writes one date-ordered document per folder.
//! - [`prepare::prepare`] runs both for a whole configuration.
//! - [`file_tool::FileTool`] hands the results to an agent runtime.

pub mod combine;
pub mod config;
pub mod contract;
pub mod dated_file;
pub mod error;
pub mod file_tool;
pub mod prepare;
pub mod rename;

pub use error::{JournalError, Result};
