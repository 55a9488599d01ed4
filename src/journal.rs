//! Line-based log writer.
//!
//! A [`Journal`] accumulates timestamped records in a [`Buffer`] and appends
//! them to a dated log file in one write:
//!
//! ```text
//! <dir>/<YYYY>/<MM>/<prefix><YYYYMMDD>.log
//! ```

use crate::core::Buffer;
use crate::error::Result;
use crate::io::create_parent_dirs;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "log";

/// Where a journal writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    /// Root directory for log files.
    pub dir: PathBuf,
    /// File name prefix placed before the date.
    pub prefix: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOG_DIR),
            prefix: String::new(),
        }
    }
}

/// Accumulates log records and flushes them to a dated file.
///
/// # Examples
///
/// ```no_run
/// use linebuf::journal::{Journal, JournalConfig};
///
/// let mut journal = Journal::new(JournalConfig::default());
/// journal.record("service started").unwrap();
/// journal.record("listening on :8080").unwrap();
/// let path = journal.flush().unwrap();
/// ```
#[derive(Debug)]
pub struct Journal {
    config: JournalConfig,
    buffer: Buffer,
    pending: usize,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub const fn new(config: JournalConfig) -> Self {
        Self {
            config,
            buffer: Buffer::new(),
            pending: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &JournalConfig {
        &self.config
    }

    /// Number of records waiting to be flushed.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Returns the records waiting to be flushed.
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Records `message` with the current local time.
    pub fn record(&mut self, message: &str) -> Result<usize> {
        self.record_at(Local::now().naive_local(), message)
    }

    /// Records `message` with the given time and returns the number of
    /// records written.
    ///
    /// Leading CR/LF bytes are dropped. A multi-line message becomes one
    /// record per line, all with the same timestamp; an empty message
    /// becomes a bare timestamp.
    pub fn record_at(&mut self, at: NaiveDateTime, message: &str) -> Result<usize> {
        let stamp = format_log_time(at);
        let message = message.trim_start_matches(['\r', '\n']);

        if message.is_empty() {
            self.buffer.write_line(&stamp)?;
            self.pending += 1;
            return Ok(1);
        }

        let mut written = 0;
        for line in message.lines() {
            self.buffer.write_line(&format!("{stamp} {line}"))?;
            // Lines already buffered are flushed even if a later one fails.
            self.pending += 1;
            written += 1;
        }
        tracing::trace!(records = written, "journal record");
        Ok(written)
    }

    /// Returns the file that records for `date` go to.
    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        log_file_path(&self.config.dir, &self.config.prefix, date)
    }

    /// Appends pending records to today's file.
    ///
    /// Returns the file path, or `None` if there was nothing to write.
    pub fn flush(&mut self) -> Result<Option<PathBuf>> {
        self.flush_at(Local::now().date_naive())
    }

    /// Appends pending records to the file for `date`.
    ///
    /// Records stay buffered if the write fails.
    pub fn flush_at(&mut self, date: NaiveDate) -> Result<Option<PathBuf>> {
        if self.buffer.size() == 0 {
            return Ok(None);
        }

        let path = self.path_for(date);
        create_parent_dirs(&path)?;
        self.buffer.write_to_file(&path, true)?;

        tracing::info!(
            path = %path.display(),
            records = self.pending,
            bytes = self.buffer.size(),
            "journal flushed"
        );

        self.buffer.clear();
        self.pending = 0;
        Ok(Some(path))
    }
}

/// Builds `<dir>/<YYYY>/<MM>/<prefix><YYYYMMDD>.log`.
#[must_use]
pub fn log_file_path(dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
        .join(format!("{prefix}{}.log", date.format("%Y%m%d")))
}

/// Formats a record timestamp: `YYYY-MM-DD hh:mm:ss`.
#[must_use]
pub fn format_log_time(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Formats a timestamp for file names: `YYYYMMDDhhmmss`.
#[must_use]
pub fn format_file_time(at: NaiveDateTime) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}
