use std::fs;
use std::path::{Path, PathBuf};

use journal_engine::{DateFormat, DEFAULT_MARKER_CLASS};
use journal_logging::{journal_info, journal_warn};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, ExportFormat};

pub(crate) const SETTINGS_FILENAME: &str = ".journal_export.ron";

/// On-disk shape of the settings file; every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
struct PersistedSettings {
    output_dir: Option<PathBuf>,
    format: Option<ExportFormat>,
    date_format: Option<String>,
    marker_class: Option<String>,
}

/// Effective settings for one run: defaults, then the settings file, then flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub date_format: DateFormat,
    pub marker_class: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: ExportFormat::Zip,
            date_format: DateFormat::default(),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
        }
    }
}

impl Settings {
    /// Command-line values win over the settings file. An invalid date format
    /// given on the command line is an error rather than a silent fallback.
    pub(crate) fn apply_cli(&mut self, cli: &Cli) -> anyhow::Result<()> {
        if let Some(dir) = &cli.output {
            self.output_dir = dir.clone();
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if let Some(pattern) = &cli.date_format {
            self.date_format = DateFormat::new(pattern.as_str())?;
        }
        if let Some(class) = &cli.marker_class {
            self.marker_class = class.clone();
        }
        Ok(())
    }
}

/// Read settings from `path`. A missing file yields defaults; an unreadable or
/// malformed one is logged and also yields defaults.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            journal_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    let persisted: PersistedSettings = match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            journal_warn!("Failed to parse settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    journal_info!("Loaded settings from {:?}", path);
    let mut settings = Settings::default();
    if let Some(dir) = persisted.output_dir {
        settings.output_dir = dir;
    }
    if let Some(format) = persisted.format {
        settings.format = format;
    }
    if let Some(pattern) = persisted.date_format {
        match DateFormat::new(pattern) {
            Ok(date_format) => settings.date_format = date_format,
            Err(err) => journal_warn!("Ignoring settings date_format: {}", err),
        }
    }
    if let Some(class) = persisted.marker_class.filter(|c| !c.trim().is_empty()) {
        settings.marker_class = class;
    }
    settings
}
