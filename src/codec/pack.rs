//! Gzip compression with base64 text packing.
//!
//! `gzip_base64` turns arbitrary bytes into a single printable token that can
//! travel inside a line record; `gunzip_base64` reverses it. The file helpers
//! compress to and from disk.

use crate::core::Buffer;
use crate::error::{CodecError, IoError, Result};
use crate::io::{read_file, write_file};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Compresses `data` into a gzip stream.
///
/// # Errors
///
/// Returns [`CodecError::Gzip`] if the encoder fails.
pub fn gzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(gzip_error)?;
    Ok(encoder.finish().map_err(gzip_error)?)
}

/// Decompresses a gzip stream.
///
/// # Errors
///
/// Returns [`CodecError::Gzip`] if `data` is not a valid gzip stream.
pub fn gunzip_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(gzip_error)?;
    Ok(out)
}

/// Gzips `data` and encodes the result as standard base64.
///
/// # Examples
///
/// ```
/// use linebuf::codec::{gunzip_base64, gzip_base64};
///
/// let packed = gzip_base64(b"hello hello hello").unwrap();
/// assert_eq!(gunzip_base64(&packed).unwrap(), b"hello hello hello");
/// ```
///
/// # Errors
///
/// Returns [`CodecError::Gzip`] if compression fails.
pub fn gzip_base64(data: &[u8]) -> Result<String> {
    Ok(STANDARD.encode(gzip_bytes(data)?))
}

/// Decodes base64 text and gunzips the result.
///
/// Surrounding whitespace in `text` is ignored.
///
/// # Errors
///
/// Returns [`CodecError::Base64`] or [`CodecError::Gzip`] for malformed input.
pub fn gunzip_base64(text: &str) -> Result<Vec<u8>> {
    let raw = STANDARD.decode(text.trim()).map_err(CodecError::from)?;
    gunzip_bytes(&raw)
}

/// Decodes packed text and appends the result to `buffer`.
///
/// Returns the number of bytes appended.
///
/// # Errors
///
/// Returns a codec error for malformed input, or a buffer error if the
/// content does not fit.
pub fn gunzip_base64_into(text: &str, buffer: &mut Buffer) -> Result<usize> {
    let data = gunzip_base64(text)?;
    Ok(buffer.write_bytes(&data)?)
}

/// Compresses the file at `path` into `<path>.gz` and returns the new path.
///
/// The compressed file gets the permissions of the source.
///
/// # Errors
///
/// Returns an error if reading, compressing or writing fails.
pub fn gzip_file<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path_ref = path.as_ref();
    let data = read_file(path_ref)?;
    let permissions = fs::metadata(path_ref)
        .map_err(|e| IoError::ReadFailed {
            path: path_ref.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?
        .permissions();

    let mut target = path_ref.as_os_str().to_owned();
    target.push(".gz");
    let target = PathBuf::from(target);

    write_file(&target, &gzip_bytes(&data)?)?;
    fs::set_permissions(&target, permissions).map_err(|source| IoError::WriteFailed {
        path: target.to_string_lossy().to_string(),
        source,
    })?;
    Ok(target)
}

/// Decompresses the gzip file `from` into `to` and returns the bytes written.
///
/// The gzip header of `from` is checked before `to` is created, so a source
/// that is not gzip leaves an existing target untouched.
///
/// # Errors
///
/// Returns [`CodecError::Gzip`] if `from` is not gzip or its stream is
/// corrupt, and an [`IoError`] if either file cannot be opened or written.
pub fn gunzip_file<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> Result<u64> {
    let from_ref = from.as_ref();
    let to_ref = to.as_ref();

    let source = File::open(from_ref).map_err(|e| IoError::ReadFailed {
        path: from_ref.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;
    let mut decoder = GzDecoder::new(BufReader::new(source));
    if decoder.header().is_none() {
        return Err(CodecError::Gzip(format!(
            "{}: missing or invalid gzip header",
            from_ref.display()
        ))
        .into());
    }

    let mut target = File::create(to_ref).map_err(|source| IoError::OpenFailed {
        path: to_ref.to_string_lossy().to_string(),
        source,
    })?;

    let mut chunk = [0u8; 8192];
    let mut written = 0u64;
    loop {
        let n = match decoder.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(gzip_error(e).into()),
        };
        target
            .write_all(&chunk[..n])
            .map_err(|source| IoError::WriteFailed {
                path: to_ref.to_string_lossy().to_string(),
                source,
            })?;
        written += n as u64;
    }

    Ok(written)
}

fn gzip_error(err: io::Error) -> CodecError {
    CodecError::Gzip(err.to_string())
}
