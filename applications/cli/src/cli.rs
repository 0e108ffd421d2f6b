//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kyofu")]
#[command(about = "Keep a music catalog in sync with your library folders", long_about = None)]
pub struct Cli {
    /// Approve every commit without prompting
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Configuration file path (default: ./kyofu.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog database URL, overrides the configuration
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a library and import everything under it
    Init {
        library_name: String,
        base_path: PathBuf,
    },
    /// Full scan of a library, optionally narrowed to sub-paths
    Scan {
        library_name: String,
        /// Re-read tags of songs that are already cataloged
        #[arg(long)]
        overwrite_song: bool,
        /// Only scan this sub-path of the library (repeatable; `.` is the whole library)
        #[arg(short = 'p', long = "path-hint", value_name = "PATH")]
        path_hint: Vec<String>,
    },
    /// Import files modified since the last import
    Update { library_name: String },
    /// Remove cataloged songs whose path starts with a prefix
    Delete {
        library_name: String,
        /// Path prefix to remove (repeatable)
        #[arg(long = "prefix", value_name = "PREFIX", required = true)]
        prefix: Vec<String>,
    },
    /// Print the metadata read from one file
    Inspect { file: PathBuf },
}

impl Cli {
    /// Library the command operates on, if any
    pub fn library_name(&self) -> Option<&str> {
        match &self.command {
            Commands::Init { library_name, .. }
            | Commands::Scan { library_name, .. }
            | Commands::Update { library_name }
            | Commands::Delete { library_name, .. } => Some(library_name),
            Commands::Inspect { .. } => None,
        }
    }
}
