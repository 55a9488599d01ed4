//! # linebuf
//!
//! Growable byte buffer with a read cursor, built for line-oriented records.
//!
//! A [`Buffer`] is appended to with `write_*` calls and consumed with
//! [`Buffer::read_line`]. Unread bytes are kept across growth: space is
//! reclaimed when everything has been read, unread data slides to the front
//! when it is small, and the storage doubles otherwise. The content can be
//! written to a file in truncate or append mode.
//!
//! ## Features
//!
//! - **Line reads**: LF or CRLF terminated lines with an end-of-data status
//! - **Bounded growth**: a per-buffer capacity limit with a typed error
//! - **Memory Mapping**: Efficient loading of large files
//! - **Journal**: timestamped records appended to dated log files
//! - **Packing**: gzip + base64 text for moving content around
//!
//! ```
//! use linebuf::{Buffer, LineStatus};
//!
//! let mut buffer = Buffer::new();
//! buffer.write_string("first\r\nsecond").unwrap();
//!
//! let line = buffer.read_line();
//! assert_eq!(line.as_bytes(), b"first");
//! assert_eq!(line.status(), LineStatus::Complete);
//!
//! let line = buffer.read_line();
//! assert_eq!(line.as_bytes(), b"second");
//! assert_eq!(line.status(), LineStatus::EndOfData);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod codec;
pub mod core;
pub mod error;
pub mod io;
pub mod journal;

// Re-export commonly used types at crate root
pub use error::{BufferError, Error, Result};

// Re-export core domain types
pub use crate::core::{
    Buffer, DEFAULT_MAX_CAPACITY, Line, LineStatus, Lines, MIN_CAPACITY, NIL_REPR, display_or_nil,
};

// Re-export I/O and codec helpers
pub use codec::{gunzip_base64, gzip_base64};
pub use io::{LoadedFile, load_file};

// Re-export journal types
pub use journal::{Journal, JournalConfig};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
