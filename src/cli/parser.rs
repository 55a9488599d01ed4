//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::journal::{DEFAULT_LOG_DIR, JournalConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// linebuf: line-record buffers, log files and gzip packing.
#[derive(Parser, Debug)]
#[command(name = "linebuf")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Root directory for journal files.
    ///
    /// Defaults to `./log`.
    #[arg(long, env = "LINEBUF_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the lines of a file.
    Lines {
        /// Path to the file.
        file: PathBuf,

        /// Only print lines matching this regex.
        #[arg(short, long)]
        pattern: Option<String>,

        /// Prefix each line with its number.
        #[arg(short, long)]
        number: bool,
    },

    /// Show size, line count and checksum of a file.
    Stats {
        /// Path to the file.
        file: PathBuf,
    },

    /// Write lines to a file (reads stdin if no lines are given).
    Append {
        /// Target file.
        file: PathBuf,

        /// Lines to write.
        lines: Vec<String>,

        /// Replace the file instead of appending.
        #[arg(long)]
        truncate: bool,
    },

    /// Add a timestamped record to today's journal file.
    Log {
        /// Message to record.
        message: String,

        /// File name prefix for the journal file.
        #[arg(long, env = "LINEBUF_LOG_PREFIX", default_value = "")]
        prefix: String,
    },

    /// Print a file as gzip + base64 text.
    Pack {
        /// Path to the file.
        file: PathBuf,
    },

    /// Restore a file from gzip + base64 text.
    Unpack {
        /// File containing the packed text.
        input: PathBuf,

        /// Where to write the restored content.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compress a file to `<file>.gz`.
    Gzip {
        /// Path to the file.
        file: PathBuf,
    },

    /// Decompress a gzip file.
    Gunzip {
        /// Gzip file to read.
        from: PathBuf,

        /// Output file.
        to: PathBuf,
    },
}

impl Cli {
    /// Returns the journal configuration for the given file prefix.
    #[must_use]
    pub fn journal_config(&self, prefix: &str) -> JournalConfig {
        JournalConfig {
            dir: self
                .log_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            prefix: prefix.to_string(),
        }
    }
}
