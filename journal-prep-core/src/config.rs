use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{JournalError, Result};

pub const DEFAULT_EXTENSION: &str = "md";
pub const DEFAULT_HEADER_TEMPLATE: &str = "=={date}==";
pub const JOURNAL_APP_BANNER: &str = "===Journal-app entries===";

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_header_template() -> String {
    DEFAULT_HEADER_TEMPLATE.to_string()
}

/// Where to normalise legacy journal names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameConfig {
    pub source_dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl RenameConfig {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            extension: default_extension(),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            source_dir = %self.source_dir.display(),
            extension = %self.extension,
            "Loaded rename config"
        );
    }
}

/// How each section of a combined document is framed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    /// strftime format for the section date, e.g. `%B %d %Y`.
    pub date_format: String,
    /// Header line; `{date}` is replaced by the formatted date.
    #[serde(default = "default_header_template")]
    pub header_template: String,
    /// Optional first line of the document.
    #[serde(default)]
    pub banner: Option<String>,
}

impl Default for SectionLayout {
    fn default() -> Self {
        LayoutPreset::JournalPast.layout()
    }
}

impl SectionLayout {
    pub fn validate(&self) -> Result<()> {
        if !self.header_template.contains("{date}") {
            return Err(JournalError::InvalidLayout(format!(
                "header template '{}' has no {{date}} placeholder",
                self.header_template
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(JournalError::InvalidLayout(format!(
                "date format '{}' is not a valid strftime string",
                self.date_format
            )));
        }
        // Time and zone specifiers parse fine but fail on a bare date.
        let sample = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
        self.header(sample)?;
        Ok(())
    }

    pub fn header(&self, date: NaiveDate) -> Result<String> {
        let mut formatted = String::new();
        write!(formatted, "{}", date.format(&self.date_format)).map_err(|_| {
            JournalError::InvalidLayout(format!(
                "date format '{}' cannot be applied to a calendar date",
                self.date_format
            ))
        })?;
        Ok(self.header_template.replace("{date}", &formatted))
    }
}

/// The two document styles the journal agents read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// `journal-past.md`: exact `DD-MM-YYYY.md` names, `January 15 2024` headers.
    JournalPast,
    /// `journal-app.txt`: any `DD-MM-YYYY` prefix, `January 15, 2024` headers and a banner.
    JournalApp,
}

impl LayoutPreset {
    pub fn layout(self) -> SectionLayout {
        match self {
            LayoutPreset::JournalPast => SectionLayout {
                date_format: "%B %d %Y".to_string(),
                header_template: default_header_template(),
                banner: None,
            },
            LayoutPreset::JournalApp => SectionLayout {
                date_format: "%B %d, %Y".to_string(),
                header_template: default_header_template(),
                banner: Some(JOURNAL_APP_BANNER.to_string()),
            },
        }
    }

    pub fn extension(self) -> Option<String> {
        match self {
            LayoutPreset::JournalPast => Some(DEFAULT_EXTENSION.to_string()),
            LayoutPreset::JournalApp => None,
        }
    }
}

impl FromStr for LayoutPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "journal-past" | "journal_past" | "JournalPast" => Ok(LayoutPreset::JournalPast),
            "journal-app" | "journal_app" | "JournalApp" => Ok(LayoutPreset::JournalApp),
            other => Err(format!(
                "unknown preset '{other}' (expected journal-past or journal-app)"
            )),
        }
    }
}

/// What to combine and where to write it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombineConfig {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    /// `Some(ext)` requires exact `DD-MM-YYYY.<ext>` names; `None` accepts any dated prefix.
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub layout: SectionLayout,
}

impl CombineConfig {
    pub fn from_preset(
        preset: LayoutPreset,
        source_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: output.into(),
            extension: preset.extension(),
            layout: preset.layout(),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            source_dir = %self.source_dir.display(),
            output = %self.output.display(),
            extension = self.extension.as_deref().unwrap_or("*"),
            "Loaded combine config"
        );
        debug!(?self.layout, "Combine layout (full debug)");
    }
}
