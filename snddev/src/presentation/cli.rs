use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "snddev: inspect and export SND sound archives", long_about = None)]
pub struct Cli {
    /// Stop at the first error instead of collecting diagnostics
    #[arg(long, global = true)]
    pub strict: bool,

    /// Root folder for the recursive archive search
    #[arg(long = "search-root", global = true)]
    pub search_root: Option<PathBuf>,

    /// JSON config file; flags given on the command line win
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write snd_error_log_<file>.txt after loading
    #[arg(long, global = true)]
    pub log: bool,

    /// Folder for the error log
    #[arg(long = "out-dir", global = true)]
    pub out_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Header fields and load statistics
    Info {
        name: String,
        /// Search only below this folder
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// One line per loaded sound
    List {
        name: String,
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// Print the details of one sound
    Show {
        name: String,
        #[arg(allow_negative_numbers = true)]
        group: i32,
        #[arg(allow_negative_numbers = true)]
        item: i32,
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Load an archive and print the diagnostics collected on the way
    Errors {
        name: String,
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// Write sounds out as .wav files
    Export {
        name: String,
        dest: PathBuf,
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Export only this sound (needs --item)
        #[arg(long, allow_negative_numbers = true)]
        group: Option<i32>,
        #[arg(long, allow_negative_numbers = true)]
        item: Option<i32>,
    },
}
