//! File-name conventions for dated journal entries.
//!
//! Two naming schemes exist:
//! - legacy names as exported by the journaling app, e.g. `2024-Feb-10-notes.md`
//! - canonical names, e.g. `10-02-2024.md`, which sort and parse unambiguously
//!
//! [`LegacyPattern`] recognises the first, [`CanonicalPattern`] the second.

use chrono::NaiveDate;
use regex::Regex;
use std::path::PathBuf;

use crate::error::{JournalError, RenameFailureReason};

/// Month abbreviations as they appear in legacy names. Case-sensitive.
pub const MONTHS: [(&str, u32); 12] = [
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("May", 5),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

pub fn month_number(abbreviation: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == abbreviation)
        .map(|(_, number)| *number)
}

/// A directory entry whose name resolved to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedFile {
    pub file_name: String,
    pub date: NaiveDate,
    pub path: PathBuf,
}

impl DatedFile {
    /// Sort key: date first, then file name so equal dates stay deterministic.
    pub fn sort_key(&self) -> (NaiveDate, &str) {
        (self.date, self.file_name.as_str())
    }
}

/// Parts of a legacy `<YYYY>-<Mon>-<DD>[suffix].<ext>` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyName {
    pub year: String,
    pub month: String,
    pub day: String,
    pub extension: String,
}

impl LegacyName {
    /// Renders the canonical `<DD>-<MM>-<YYYY>.<ext>` name.
    pub fn canonical_name(&self) -> Result<String, RenameFailureReason> {
        let month = month_number(&self.month).ok_or_else(|| {
            RenameFailureReason::UnknownMonthAbbreviation {
                abbreviation: self.month.clone(),
            }
        })?;
        Ok(format!(
            "{}-{:02}-{}.{}",
            self.day, month, self.year, self.extension
        ))
    }
}

pub struct LegacyPattern {
    regex: Regex,
    extension: String,
}

impl LegacyPattern {
    pub fn new(extension: &str) -> Result<Self, JournalError> {
        let regex = Regex::new(&format!(
            r"^(\d{{4}})-([A-Za-z]{{3}})-(\d{{2}}).*\.{}$",
            regex::escape(extension)
        ))?;
        Ok(Self {
            regex,
            extension: extension.to_string(),
        })
    }

    pub fn parse(&self, file_name: &str) -> Option<LegacyName> {
        let caps = self.regex.captures(file_name)?;
        Some(LegacyName {
            year: caps[1].to_string(),
            month: caps[2].to_string(),
            day: caps[3].to_string(),
            extension: self.extension.clone(),
        })
    }
}

/// Outcome of matching a name against the canonical pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Date(NaiveDate),
    /// The name has the right shape but names no real day (`31-02-2024`).
    InvalidDate,
    NoMatch,
}

pub struct CanonicalPattern {
    regex: Regex,
}

impl CanonicalPattern {
    /// With an extension, the whole name must be `DD-MM-YYYY.<ext>`.
    /// Without one, any name starting with `DD-MM-YYYY` matches.
    pub fn new(extension: Option<&str>) -> Result<Self, JournalError> {
        let pattern = match extension {
            Some(ext) => format!(r"^(\d{{2}})-(\d{{2}})-(\d{{4}})\.{}$", regex::escape(ext)),
            None => r"^(\d{2})-(\d{2})-(\d{4})".to_string(),
        };
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn parse(&self, file_name: &str) -> NameMatch {
        let Some(caps) = self.regex.captures(file_name) else {
            return NameMatch::NoMatch;
        };
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => NameMatch::Date(date),
            None => NameMatch::InvalidDate,
        }
    }
}
