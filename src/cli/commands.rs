//! CLI command implementations.
//!
//! Contains the logic for each CLI command.

use crate::cli::output::{
    FileStats, NumberedLine, OutputFormat, WriteSummary, format_file_result, format_lines,
    format_packed, format_stats, format_write_summary,
};
use crate::cli::parser::{Cli, Commands};
use crate::codec::{gunzip_base64_into, gunzip_file, gzip_base64, gzip_file};
use crate::core::Buffer;
use crate::error::{CommandError, Error, IoError, Result};
use crate::io::{load_file, read_file};
use crate::journal::Journal;
use regex::Regex;
use std::io::{self, Read};
use std::path::Path;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Lines {
            file,
            pattern,
            number,
        } => cmd_lines(file, pattern.as_deref(), *number, format),
        Commands::Stats { file } => cmd_stats(file, format),
        Commands::Append {
            file,
            lines,
            truncate,
        } => cmd_append(file, lines, *truncate, format),
        Commands::Log { message, prefix } => {
            if prefix.contains(['/', '\\']) {
                return Err(Error::Config {
                    message: format!("journal prefix must not contain a path separator: {prefix}"),
                });
            }
            let mut journal = Journal::new(cli.journal_config(prefix));
            cmd_log(&mut journal, message, format)
        }
        Commands::Pack { file } => cmd_pack(file, format),
        Commands::Unpack { input, output } => cmd_unpack(input, output, format),
        Commands::Gzip { file } => cmd_gzip(file, format),
        Commands::Gunzip { from, to } => cmd_gunzip(from, to, format),
    }
}

/// Writes `lines` to `path` through a [`Buffer`], one record per line.
///
/// # Errors
///
/// Returns an error if the buffer cannot grow or the file cannot be written.
pub fn write_lines<'a, I>(path: &Path, lines: I, truncate: bool) -> Result<WriteSummary>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buffer = Buffer::new();
    let mut count = 0;
    for line in lines {
        buffer.write_line(line)?;
        count += 1;
    }

    buffer.write_to_file(path, !truncate)?;
    tracing::info!(
        path = %path.display(),
        lines = count,
        bytes = buffer.size(),
        append = !truncate,
        "wrote buffer"
    );

    Ok(WriteSummary {
        path: path.to_string_lossy().to_string(),
        lines: count,
        bytes: buffer.size(),
        appended: !truncate,
    })
}

// ==================== Command Implementations ====================

fn cmd_lines(
    file: &Path,
    pattern: Option<&str>,
    number: bool,
    format: OutputFormat,
) -> Result<String> {
    let regex = pattern
        .map(Regex::new)
        .transpose()
        .map_err(CommandError::from)?;

    let mut loaded = load_file(file)?;
    tracing::debug!(
        path = %file.display(),
        size = loaded.buffer.size(),
        capacity = loaded.buffer.cap(),
        "loaded file"
    );

    let lines: Vec<NumberedLine> = loaded
        .buffer
        .lines()
        .enumerate()
        .filter(|(_, text)| regex.as_ref().is_none_or(|re| re.is_match(text)))
        .map(|(i, text)| NumberedLine {
            number: i + 1,
            text,
        })
        .collect();

    Ok(format_lines(&lines, number, format))
}

fn cmd_stats(file: &Path, format: OutputFormat) -> Result<String> {
    let mut loaded = load_file(file)?;
    let capacity = loaded.buffer.cap();
    let unterminated_tail = loaded
        .buffer
        .as_bytes()
        .last()
        .is_some_and(|&b| b != b'\n');

    let mut lines = 0;
    let mut longest_line = 0;
    loop {
        let line = loaded.buffer.read_line();
        if line.is_end_of_data() && line.is_empty() {
            break;
        }
        lines += 1;
        longest_line = longest_line.max(line.len());
        if line.is_end_of_data() {
            break;
        }
    }

    let stats = FileStats {
        path: file.to_string_lossy().to_string(),
        size: loaded.size,
        capacity,
        lines,
        longest_line,
        unterminated_tail,
        checksum: loaded.checksum,
        modified: loaded.modified.map(|t| t.to_rfc3339()),
    };
    Ok(format_stats(&stats, format))
}

fn cmd_append(file: &Path, lines: &[String], truncate: bool, format: OutputFormat) -> Result<String> {
    let summary = if lines.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).map_err(|e| {
            CommandError::ExecutionFailed(format!("failed to read from stdin: {e}"))
        })?;
        write_lines(file, input.lines(), truncate)?
    } else {
        write_lines(file, lines.iter().map(String::as_str), truncate)?
    };

    Ok(format_write_summary(&summary, format))
}

fn cmd_log(journal: &mut Journal, message: &str, format: OutputFormat) -> Result<String> {
    let records = journal.record(message)?;
    let path = journal.flush()?.ok_or_else(|| {
        CommandError::ExecutionFailed("journal had nothing to flush".to_string())
    })?;

    match format {
        OutputFormat::Text => Ok(format!(
            "Logged {records} record(s) to {}\n",
            path.display()
        )),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "records": records,
                "path": path.to_string_lossy(),
            });
            Ok(serde_json::to_string_pretty(&result).map_err(CommandError::from)?)
        }
    }
}

fn cmd_pack(file: &Path, format: OutputFormat) -> Result<String> {
    let loaded = load_file(file)?;
    let packed = gzip_base64(loaded.buffer.as_bytes())?;
    tracing::debug!(
        original = loaded.buffer.size(),
        packed = packed.len(),
        "packed file"
    );
    Ok(format_packed(&packed, loaded.buffer.size(), format))
}

fn cmd_unpack(input: &Path, output: &Path, format: OutputFormat) -> Result<String> {
    let text = read_file(input)?;
    let text = String::from_utf8_lossy(&text);

    let mut buffer = Buffer::new();
    let bytes = gunzip_base64_into(&text, &mut buffer)?;
    buffer.write_to_file(output, false)?;

    Ok(format_file_result(
        "Restored",
        &output.to_string_lossy(),
        bytes as u64,
        format,
    ))
}

fn cmd_gzip(file: &Path, format: OutputFormat) -> Result<String> {
    let target = gzip_file(file)?;
    let bytes = std::fs::metadata(&target)
        .map(|m| m.len())
        .map_err(|e| IoError::ReadFailed {
            path: target.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    Ok(format_file_result(
        "Created",
        &target.to_string_lossy(),
        bytes,
        format,
    ))
}

fn cmd_gunzip(from: &Path, to: &Path, format: OutputFormat) -> Result<String> {
    let bytes = gunzip_file(from, to)?;
    Ok(format_file_result(
        "Restored",
        &to.to_string_lossy(),
        bytes,
        format,
    ))
}
