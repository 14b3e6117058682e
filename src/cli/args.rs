//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use clap_complete::Shell;

/// Title used when no words are given on the command line.
pub const DEFAULT_TITLE: &str = "新しい依頼";

/// Generate a KityMinder request-document template
#[derive(Parser, Debug)]
#[command(name = "kmgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Request title (multiple words are joined with spaces)
    pub title: Vec<String>,

    /// Explicit output path (no collision renaming, may overwrite)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Explicit configuration file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Do not hand the artifact to an editor
    #[arg(long)]
    pub no_open: bool,

    /// Debug level (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,
}

impl Cli {
    /// Title assembled from the free arguments, defaulting when none given.
    pub fn resolved_title(&self) -> String {
        if self.title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            self.title.join(" ")
        }
    }
}
