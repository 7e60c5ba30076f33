use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// planotui - A terminal action plan tracker
#[derive(Parser)]
#[command(name = "planotui")]
#[command(about = "Track an action plan with goals, pacing, and progress charts")]
#[command(version)]
pub struct Cli {
    /// Directory holding the persisted plan snapshot.
    ///
    /// Defaults to `$HOME/.local/share/planotui`, falling back to the
    /// current directory when no home is available.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export the stored plan to a JSON file
    Export {
        /// Output path (defaults to plano_acao_tbn_<date>.json in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a plan from a JSON file, replacing the stored plan
    Import {
        /// Path to the plan file to import
        file: PathBuf,
    },
    /// Validate a plan file without importing it
    Validate {
        /// Path to the plan file to validate
        file: PathBuf,
    },
    /// Print plan metrics without entering the TUI
    Summary,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
