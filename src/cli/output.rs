//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// A line read from a file, with its 1-based number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedLine {
    /// Line number, starting at 1.
    pub number: usize,
    /// Line content without the terminator.
    pub text: String,
}

/// Summary of a file loaded into a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Source path.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Buffer capacity after loading.
    pub capacity: usize,
    /// Number of lines.
    pub lines: usize,
    /// Length of the longest line in bytes.
    pub longest_line: usize,
    /// True if the last line has no line feed.
    pub unterminated_tail: bool,
    /// Content checksum.
    pub checksum: String,
    /// Last modification time (RFC 3339, UTC).
    pub modified: Option<String>,
}

/// Result of writing a buffer to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    /// Target path.
    pub path: String,
    /// Number of lines written.
    pub lines: usize,
    /// Number of bytes written.
    pub bytes: usize,
    /// True if the content was appended rather than replacing the file.
    pub appended: bool,
}

/// Formats lines, optionally with line numbers.
#[must_use]
pub fn format_lines(lines: &[NumberedLine], number: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for line in lines {
                if number {
                    let _ = writeln!(output, "{:>6}  {}", line.number, line.text);
                } else {
                    let _ = writeln!(output, "{}", line.text);
                }
            }
            output
        }
        OutputFormat::Json => format_json(&lines),
    }
}

/// Formats file statistics.
#[must_use]
pub fn format_stats(stats: &FileStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "File: {}", stats.path);
            let _ = writeln!(output, "  Size:         {}", format_size(stats.size));
            let _ = writeln!(output, "  Capacity:     {} bytes", stats.capacity);
            let _ = writeln!(output, "  Lines:        {}", stats.lines);
            let _ = writeln!(output, "  Longest line: {} bytes", stats.longest_line);
            if stats.unterminated_tail {
                output.push_str("  Last line has no line feed\n");
            }
            let _ = writeln!(output, "  Checksum:     {}", stats.checksum);
            if let Some(ref modified) = stats.modified {
                let _ = writeln!(output, "  Modified:     {modified}");
            }
            output
        }
        OutputFormat::Json => format_json(stats),
    }
}

/// Formats the result of writing lines to a file.
#[must_use]
pub fn format_write_summary(summary: &WriteSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "{} {} lines ({} bytes) {} {}\n",
            if summary.appended { "Appended" } else { "Wrote" },
            summary.lines,
            summary.bytes,
            if summary.appended { "to" } else { "into" },
            summary.path
        ),
        OutputFormat::Json => format_json(summary),
    }
}

/// Formats packed (gzip + base64) text.
#[must_use]
pub fn format_packed(packed: &str, original_size: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{packed}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({
            "packed": packed,
            "original_size": original_size,
            "packed_size": packed.len(),
        })),
    }
}

/// Formats the result of an operation that produced a file.
#[must_use]
pub fn format_file_result(action: &str, path: &str, bytes: u64, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{action} {path} ({bytes} bytes)\n"),
        OutputFormat::Json => format_json(&serde_json::json!({
            "action": action,
            "path": path,
            "bytes": bytes,
        })),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({
            "error": error_kind(err),
            "message": err.to_string(),
        })),
    }
}

const fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::Buffer(_) => "buffer",
        Error::Io(_) => "io",
        Error::Codec(_) => "codec",
        Error::Command(_) => "command",
        Error::Config { .. } => "config",
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
