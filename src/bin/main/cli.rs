use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use speedread_core::render::Theme;
use speedread_host::document::DocumentKind;

/// Terminal RSVP speed reader.
#[derive(Debug, Parser)]
#[command(name = "speedread", version, about)]
pub(super) struct Cli {
    /// Document to read; `-` or nothing reads stdin.
    pub file: Option<PathBuf>,

    /// Document kind, overriding the file extension (text, markdown, html, pdf).
    #[arg(long)]
    pub kind: Option<DocumentKind>,

    /// Reading speed in words per minute.
    #[arg(
        long,
        env = "SPEEDREAD_WPM",
        value_parser = clap::value_parser!(u16).range(100..=900)
    )]
    pub wpm: Option<u16>,

    /// Show every word for the same time.
    #[arg(long)]
    pub no_dynamic_pacing: bool,

    /// Where session and settings files live. Defaults to `$HOME/.speedread`.
    #[arg(long, env = "SPEEDREAD_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Continue from a saved position without asking.
    #[arg(long, conflicts_with = "fresh")]
    pub resume: bool,

    /// Ignore any saved position.
    #[arg(long)]
    pub fresh: bool,

    /// Start playing right away.
    #[arg(long)]
    pub autoplay: bool,

    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    #[arg(long, env = "SPEEDREAD_LOG", default_value = "warn")]
    pub log_level: LevelFilter,

    /// Write log records to this file instead of stderr.
    #[arg(long, env = "SPEEDREAD_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Plain output without ANSI colors.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(super) enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Dark => Self::Dark,
            ThemeArg::Light => Self::Light,
        }
    }
}

impl Cli {
    /// `None` when the document comes from stdin.
    pub fn document_path(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|path| path.as_os_str() != "-")
    }
}
