//! Small filesystem helpers.
//!
//! Thin wrappers around `std::fs` that report failures through
//! [`IoError`] with the offending path attached.

use crate::error::{IoError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns true if `path` exists.
#[must_use]
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Creates an empty file if nothing exists at `path`.
///
/// Returns `true` if the file was created, `false` if it already existed.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        return Ok(false);
    }

    File::create(path_ref).map_err(|source| IoError::OpenFailed {
        path: path_ref.to_string_lossy().to_string(),
        source,
    })?;
    Ok(true)
}

/// Deletes the file at `path`.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be removed.
pub fn delete_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path_ref = path.as_ref();
    std::fs::remove_file(path_ref).map_err(|source| IoError::DeleteFailed {
        path: path_ref.to_string_lossy().to_string(),
        source,
    })?;
    Ok(())
}

/// Appends `data` to the file at `path`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn append_file<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path_ref)
        .map_err(|source| IoError::OpenFailed {
            path: path_str.clone(),
            source,
        })?;

    file.write_all(data).map_err(|source| IoError::WriteFailed {
        path: path_str,
        source,
    })?;
    Ok(())
}

/// Replaces the file at `path` with `data` and syncs it to disk.
///
/// Parent directories are created when missing. Returns the number of
/// bytes written.
///
/// # Errors
///
/// Returns an error if directory creation, writing or syncing fails.
pub fn write_file<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<usize> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    create_parent_dirs(path_ref)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path_ref)
        .map_err(|source| IoError::OpenFailed {
            path: path_str.clone(),
            source,
        })?;

    file.write_all(data).map_err(|source| IoError::WriteFailed {
        path: path_str.clone(),
        source,
    })?;

    file.sync_all().map_err(|source| IoError::SyncFailed {
        path: path_str,
        source,
    })?;

    Ok(data.len())
}

/// Creates the parent directories of `path` if they are missing.
///
/// # Errors
///
/// Returns an error if a directory cannot be created.
pub fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
            path: parent.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

/// Returns `path` with its extension replaced by `ext`.
///
/// An empty `ext` removes the extension.
///
/// # Examples
///
/// ```
/// use linebuf::io::change_extension;
/// use std::path::PathBuf;
///
/// assert_eq!(change_extension("logs/app.txt", "gz"), PathBuf::from("logs/app.gz"));
/// ```
#[must_use]
pub fn change_extension<P: AsRef<Path>>(path: P, ext: &str) -> PathBuf {
    path.as_ref().with_extension(ext)
}
