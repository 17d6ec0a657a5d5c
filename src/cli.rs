use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// One or more rendered notebook pages (HTML).
    #[arg(long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Output directory. Each page is written under its original file name.
    #[arg(long, default_value = "out")]
    pub out: PathBuf,

    /// JSON file overriding selectors, class names, storage key or timings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON file backing client-side storage (theme preference).
    ///
    /// Without it, storage starts empty and is discarded after the run.
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Click the theme toggle once, on the first page that has one.
    ///
    /// Later pages pick the result up from storage.
    #[arg(long)]
    pub toggle_theme: bool,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,
}
