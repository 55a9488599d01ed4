//! File reading with memory mapping support.
//!
//! Small files are read directly; large ones are memory mapped and copied
//! straight into a [`Buffer`].

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::core::Buffer;
use crate::error::{IoError, Result};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use memmap2::Mmap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum file size to read into memory (1GB).
const MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// File reader with support for memory mapping.
///
/// Chooses the reading strategy based on file size:
/// - Small files (< 1MB): Read directly into memory
/// - Large files (>= 1MB): Use memory mapping
///
/// # Examples
///
/// ```no_run
/// use linebuf::io::FileReader;
///
/// let reader = FileReader::open("records.log").unwrap();
/// let buffer = reader.read_to_buffer().unwrap();
/// ```
pub struct FileReader {
    /// File handle.
    file: File,
    /// File size in bytes.
    size: u64,
    /// File path for error messages.
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be opened, or is
    /// larger than 1GB.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let metadata = file.metadata().map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: "is not a file".to_string(),
            }
            .into());
        }

        let size = metadata.len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the last modification time in UTC, if the platform reports it.
    #[must_use]
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.file
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }

    /// Reads the file content as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_to_bytes(&self) -> Result<Vec<u8>> {
        if self.size >= MMAP_THRESHOLD {
            Ok(self.mmap()?.to_vec())
        } else {
            self.read_direct_bytes()
        }
    }

    /// Reads the file content into a fresh [`Buffer`].
    ///
    /// Large files are copied from the mapping without an intermediate
    /// vector.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content exceeds the buffer's
    /// capacity limit.
    pub fn read_to_buffer(&self) -> Result<Buffer> {
        let mut buffer = Buffer::new();
        if self.size >= MMAP_THRESHOLD {
            let mmap = self.mmap()?;
            buffer.write_bytes(&mmap)?;
        } else {
            buffer.write_bytes(&self.read_direct_bytes()?)?;
        }
        Ok(buffer)
    }

    /// Reads bytes directly into memory.
    #[allow(clippy::cast_possible_truncation)]
    fn read_direct_bytes(&self) -> Result<Vec<u8>> {
        let mut file = &self.file;
        let mut bytes = Vec::with_capacity(self.size as usize);
        file.read_to_end(&mut bytes)
            .map_err(|e| IoError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }

    /// Creates a memory-mapped view of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if memory mapping fails.
    pub fn mmap(&self) -> Result<Mmap> {
        // Safety: We're only reading from the file
        unsafe {
            Mmap::map(&self.file).map_err(|e| {
                IoError::MmapFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }
                .into()
            })
        }
    }
}

/// A file loaded into a [`Buffer`], with its metadata.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Path the file was loaded from.
    pub path: PathBuf,
    /// Size on disk in bytes.
    pub size: u64,
    /// Last modification time in UTC.
    pub modified: Option<DateTime<Utc>>,
    /// Hex digest of the content.
    pub checksum: String,
    /// File content, cursor at the start.
    pub buffer: Buffer,
}

/// Reads a file into memory.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
///
/// # Examples
///
/// ```no_run
/// use linebuf::io::read_file;
///
/// let bytes = read_file("example.txt").unwrap();
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    FileReader::open(path)?.read_to_bytes()
}

/// Loads a file into a [`Buffer`] and records its size, time and checksum.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not fit a buffer.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LoadedFile> {
    let path_ref = path.as_ref();
    let reader = FileReader::open(path_ref)?;
    let buffer = reader.read_to_buffer()?;

    Ok(LoadedFile {
        path: path_ref.to_path_buf(),
        size: reader.size(),
        modified: reader.modified(),
        checksum: checksum(buffer.as_bytes()),
        buffer,
    })
}

/// Computes the MD5 digest of `data` as 32 lowercase hex digits.
///
/// Used for change detection, not for security.
#[must_use]
pub fn checksum(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize().iter().fold(String::with_capacity(32), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
