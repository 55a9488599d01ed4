//! CLI layer for linebuf.
//!
//! Provides the command-line interface using clap, with commands for
//! reading line files, appending records, journaling and gzip packing.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{execute, write_lines};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
