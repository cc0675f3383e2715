use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use journal_core::ExportMode;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "journal-export")]
#[command(version)]
#[command(about = "Convert a browser-exported journal into Markdown", long_about = None)]
pub struct Cli {
    /// Export folder (containing index.html) or a .zip of that folder.
    pub input: PathBuf,

    /// First day to export (YYYY-MM-DD). Defaults to the earliest entry.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day to export (YYYY-MM-DD). Defaults to the latest entry.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// One file per entry in a zip, or everything in one Markdown document.
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Directory the export is written to.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// strftime pattern for the date line under each entry title.
    #[arg(long)]
    pub date_format: Option<String>,

    /// Class marking body paragraphs in entry documents.
    #[arg(long)]
    pub marker_class: Option<String>,

    /// List the entries in range instead of exporting them.
    #[arg(long)]
    pub list: bool,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,

    /// Settings file (RON). Defaults to ./.journal_export.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ExportFormat {
    Zip,
    Single,
}

impl ExportFormat {
    pub fn mode(self) -> ExportMode {
        match self {
            ExportFormat::Zip => ExportMode::Archive,
            ExportFormat::Single => ExportMode::SingleDocument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    /// Write to ./journal_export.log in the current directory.
    File,
    /// Write to the terminal (stderr).
    Terminal,
    /// Write to both.
    Both,
}
