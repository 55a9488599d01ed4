//! Error types for linebuf operations.
//!
//! This module provides the error hierarchy using `thiserror` for buffer
//! growth, file I/O, compression, and CLI commands.

use thiserror::Error;

/// Result type alias for linebuf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer growth errors.
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Compression and encoding errors.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Errors raised by the buffer growth algorithm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The capacity needed for a write exceeds the buffer's limit, or the
    /// allocator refused it.
    #[error("buffer too large: {requested} bytes requested (max: {max} bytes)")]
    TooLarge {
        /// Capacity that the write would need, saturated at `usize::MAX`.
        requested: usize,
        /// The buffer's capacity limit.
        max: usize,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to open a file for writing.
    #[error("failed to open file: {path}: {source}")]
    OpenFailed {
        /// Path to the file.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {source}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to flush file contents to disk.
    #[error("failed to sync file: {path}: {source}")]
    SyncFailed {
        /// Path to the file.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to delete a file.
    #[error("failed to delete file: {path}: {source}")]
    DeleteFailed {
        /// Path to the file.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

impl IoError {
    /// Returns the underlying `std::io::Error`, if this variant carries one.
    #[must_use]
    pub fn io_source(&self) -> Option<&std::io::Error> {
        match self {
            Self::OpenFailed { source, .. }
            | Self::WriteFailed { source, .. }
            | Self::SyncFailed { source, .. }
            | Self::DeleteFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Compression and encoding errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(String),

    /// Gzip stream could not be produced or decoded.
    #[error("gzip failed: {0}")]
    Gzip(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<base64::DecodeError> for CodecError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err.to_string())
    }
}

impl From<regex::Error> for CommandError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}
