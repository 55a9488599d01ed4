//! Growable byte buffer with a read cursor.
//!
//! A [`Buffer`] owns a contiguous storage region and tracks two positions in
//! it: the logical length (end of written content) and the read cursor (start
//! of unread content). Writes append at the logical end; [`Buffer::read_line`]
//! consumes from the cursor. The range between the two is the *active window*.
//!
//! A write into a fully consumed buffer restarts at offset zero. Growth reuses
//! space before allocating: it first extends into trailing slack, then slides
//! the unread window down to offset zero, and only then reallocates to
//! `2 * capacity + n`.

use crate::error::{BufferError, IoError, Result};
use std::borrow::Cow;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Size of the first allocation for small writes.
pub const MIN_CAPACITY: usize = 64;

/// Default capacity limit for a buffer (1 GiB).
///
/// A write that would need more storage than the limit fails with
/// [`BufferError::TooLarge`] instead of aborting the process.
pub const DEFAULT_MAX_CAPACITY: usize = 1024 * 1024 * 1024;

/// Text shown by [`display_or_nil`] for a missing buffer.
pub const NIL_REPR: &str = "<nil>";

const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// Growable byte container with a read cursor for line records.
///
/// # Examples
///
/// ```
/// use linebuf::core::{Buffer, LineStatus};
///
/// let mut buffer = Buffer::new();
/// buffer.write_line("alpha").unwrap();
/// buffer.write_line("beta").unwrap();
///
/// assert_eq!(buffer.read_line().as_bytes(), b"alpha");
/// assert_eq!(buffer.read_line().as_bytes(), b"beta");
///
/// let last = buffer.read_line();
/// assert!(last.is_empty());
/// assert_eq!(last.status(), LineStatus::EndOfData);
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Physical storage; `storage.len()` is the capacity.
    storage: Vec<u8>,
    /// End of meaningful content.
    len: usize,
    /// Read cursor.
    off: usize,
    /// Upper bound on `storage.len()`.
    max_capacity: usize,
}

/// Outcome of a single [`Buffer::read_line`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// A line feed was found; the line excludes it and any CR before it.
    Complete,
    /// No line feed remained; the line holds whatever bytes were left,
    /// possibly none.
    EndOfData,
}

/// A line returned by [`Buffer::read_line`], borrowed from the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    bytes: &'a [u8],
    status: LineStatus,
}

impl<'a> Line<'a> {
    /// Returns the line content.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the line as text, replacing invalid UTF-8.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }

    /// Returns how the read ended.
    #[must_use]
    pub const fn status(&self) -> LineStatus {
        self.status
    }

    /// True if the line was terminated by a line feed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.status, LineStatus::Complete)
    }

    /// True if the read reached the end of the content.
    #[must_use]
    pub const fn is_end_of_data(&self) -> bool {
        matches!(self.status, LineStatus::EndOfData)
    }

    /// Length of the line in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the line has no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Buffer {
    /// Creates an empty buffer with no storage and the default limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates an empty buffer whose storage may never exceed `max_capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linebuf::core::Buffer;
    ///
    /// let mut buffer = Buffer::with_max_capacity(16);
    /// assert!(buffer.write_string("short").is_ok());
    /// assert!(buffer.write_string("this does not fit").is_err());
    /// assert_eq!(buffer.as_bytes(), b"short");
    /// ```
    #[must_use]
    pub const fn with_max_capacity(max_capacity: usize) -> Self {
        Self {
            storage: Vec::new(),
            len: 0,
            off: 0,
            max_capacity,
        }
    }

    /// Creates a buffer holding a copy of `data`.
    pub fn from_bytes(data: &[u8]) -> std::result::Result<Self, BufferError> {
        let mut buffer = Self::new();
        buffer.write_bytes(data)?;
        Ok(buffer)
    }

    /// Returns the active window (unread content).
    ///
    /// The slice borrows the buffer, so it cannot outlive the next write or
    /// read.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[self.off..self.len]
    }

    /// Returns the active window as text, replacing invalid UTF-8.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Logical length: number of bytes written and not cleared.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Physical capacity of the storage.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.storage.len()
    }

    /// Read cursor position.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.off
    }

    /// Number of bytes between the cursor and the logical end.
    #[must_use]
    pub const fn unread_len(&self) -> usize {
        self.len - self.off
    }

    /// True if there is nothing left to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.unread_len() == 0
    }

    /// Capacity limit for this buffer.
    #[must_use]
    pub const fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Moves the cursor back to the start; content is kept.
    pub const fn rewind(&mut self) {
        self.off = 0;
    }

    /// Discards all content. Storage is kept for reuse.
    pub const fn clear(&mut self) {
        self.len = 0;
        self.off = 0;
    }

    /// Appends raw bytes and returns the number written.
    pub fn write_bytes(&mut self, data: &[u8]) -> std::result::Result<usize, BufferError> {
        let at = self.reserve(data.len())?;
        self.storage[at..at + data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    /// Appends the bytes of `s` and returns the number written.
    pub fn write_string(&mut self, s: &str) -> std::result::Result<usize, BufferError> {
        self.write_bytes(s.as_bytes())
    }

    /// Appends `s` followed by a line feed, as a single append.
    ///
    /// Returns `s.len() + 1`.
    pub fn write_line(&mut self, s: &str) -> std::result::Result<usize, BufferError> {
        let n = s.len().checked_add(1).ok_or(BufferError::TooLarge {
            requested: usize::MAX,
            max: self.max_capacity,
        })?;
        let at = self.reserve(n)?;
        self.storage[at..at + s.len()].copy_from_slice(s.as_bytes());
        self.storage[at + s.len()] = LF;
        Ok(n)
    }

    /// Reads up to and including the next line feed.
    ///
    /// On [`LineStatus::Complete`] the returned line excludes the line feed
    /// and one carriage return right before it. On [`LineStatus::EndOfData`]
    /// the line is the untouched remainder and the cursor moves to the end.
    pub fn read_line(&mut self) -> Line<'_> {
        let start = self.off;
        let found = self.storage[start..self.len]
            .iter()
            .position(|&b| b == LF);

        match found {
            Some(i) => {
                self.off = start + i + 1;
                let mut end = start + i;
                if end > start && self.storage[end - 1] == CR {
                    end -= 1;
                }
                Line {
                    bytes: &self.storage[start..end],
                    status: LineStatus::Complete,
                }
            }
            None => {
                self.off = self.len;
                Line {
                    bytes: &self.storage[start..self.len],
                    status: LineStatus::EndOfData,
                }
            }
        }
    }

    /// Returns an iterator that consumes the remaining lines as owned text.
    ///
    /// A non-empty unterminated remainder is yielded as the last line; an
    /// empty remainder ends the iteration.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines {
            buffer: self,
            done: false,
        }
    }

    /// Writes the whole logical content `[0, size)` to `path`.
    ///
    /// The file is created if missing. With `append` the content goes after
    /// the existing bytes, otherwise the file is truncated first. The cursor
    /// is rewound before writing, and the file is synced to disk before the
    /// handle is dropped. Partial writes are not rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OpenFailed`], [`IoError::WriteFailed`] or
    /// [`IoError::SyncFailed`] with the underlying error as source.
    pub fn write_to_file<P: AsRef<Path>>(&mut self, path: P, append: bool) -> Result<()> {
        let path_ref = path.as_ref();

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(path_ref)
            .map_err(|source| IoError::OpenFailed {
                path: path_ref.to_string_lossy().to_string(),
                source,
            })?;

        self.rewind();
        file.write_all(self.as_bytes())
            .map_err(|source| IoError::WriteFailed {
                path: path_ref.to_string_lossy().to_string(),
                source,
            })?;

        file.sync_all().map_err(|source| IoError::SyncFailed {
            path: path_ref.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Makes room for `n` more bytes and returns where they must be copied.
    fn reserve(&mut self, n: usize) -> std::result::Result<usize, BufferError> {
        // Everything was read: start over at the front.
        if self.unread_len() == 0 && self.off != 0 && n <= self.storage.len() {
            self.clear();
        }

        let at = match self.try_grow_by_reslice(n) {
            Some(at) => at,
            None => self.grow(n)?,
        };
        debug_assert!(self.off <= self.len && self.len <= self.storage.len());
        Ok(at)
    }

    fn try_grow_by_reslice(&mut self, n: usize) -> Option<usize> {
        (n <= self.storage.len() - self.len).then(|| self.extend_len(n))
    }

    const fn extend_len(&mut self, n: usize) -> usize {
        let at = self.len;
        self.len += n;
        at
    }

    fn grow(&mut self, n: usize) -> std::result::Result<usize, BufferError> {
        let m = self.unread_len();
        let c = self.storage.len();

        if self.storage.is_empty() && n <= MIN_CAPACITY && MIN_CAPACITY <= self.max_capacity {
            self.storage = Self::allocate(MIN_CAPACITY, self.max_capacity)?;
            self.off = 0;
            self.len = n;
            return Ok(0);
        }

        // Slide only while the result stays at most half full, so the
        // buffer does not spend all its time copying.
        if m <= c / 2 && n <= c / 2 - m {
            return Ok(self.slide(n));
        }

        let needed = m.checked_add(n).filter(|&total| total <= self.max_capacity);
        let Some(needed) = needed else {
            return Err(BufferError::TooLarge {
                requested: m.saturating_add(n),
                max: self.max_capacity,
            });
        };

        let new_cap = match doubled_capacity(c, n) {
            Some(cap) if cap <= self.max_capacity => cap,
            // Doubling would pass the limit but the content still fits.
            _ if needed <= c => return Ok(self.slide(n)),
            _ => self.max_capacity,
        };

        let mut storage = Self::allocate(new_cap, self.max_capacity)?;
        storage[..m].copy_from_slice(&self.storage[self.off..self.len]);
        self.storage = storage;
        self.off = 0;
        self.len = needed;
        Ok(m)
    }

    /// Moves the active window to offset zero and extends it by `n`.
    fn slide(&mut self, n: usize) -> usize {
        let m = self.unread_len();
        self.storage.copy_within(self.off..self.len, 0);
        self.off = 0;
        self.len = m + n;
        m
    }

    fn allocate(capacity: usize, max: usize) -> std::result::Result<Vec<u8>, BufferError> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| BufferError::TooLarge {
                requested: capacity,
                max,
            })?;
        storage.resize(capacity, 0);
        Ok(storage)
    }
}

/// Capacity after geometric growth: `2 * current + additional`.
const fn doubled_capacity(current: usize, additional: usize) -> Option<usize> {
    match current.checked_mul(2) {
        Some(doubled) => doubled.checked_add(additional),
        None => None,
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Renders the active window of `buffer`, or [`NIL_REPR`] when there is none.
#[must_use]
pub fn display_or_nil(buffer: Option<&Buffer>) -> Cow<'_, str> {
    buffer.map_or(Cow::Borrowed(NIL_REPR), Buffer::to_string_lossy)
}

/// Iterator over the remaining lines of a buffer. See [`Buffer::lines`].
#[derive(Debug)]
pub struct Lines<'a> {
    buffer: &'a mut Buffer,
    done: bool,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let (text, end_of_data) = {
            let line = self.buffer.read_line();
            (line.to_string_lossy().into_owned(), line.is_end_of_data())
        };

        if end_of_data {
            self.done = true;
            if text.is_empty() {
                return None;
            }
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn assert_invariants(buffer: &Buffer) {
        assert!(buffer.pos() <= buffer.size());
        assert!(buffer.size() <= buffer.cap());
        assert!(buffer.cap() <= buffer.max_capacity());
    }

    #[test]
    fn test_new_buffer_is_unallocated() {
        let buffer = Buffer::new();
        assert_eq!(buffer.size(), 0);
        assert_eq!(buffer.cap(), 0);
        assert_eq!(buffer.pos(), 0);
        assert!(buffer.as_bytes().is_empty());
        assert!(buffer.is_empty());
        assert_eq!(buffer.max_capacity(), DEFAULT_MAX_CAPACITY);
        assert_eq!(buffer.to_string(), "");
    }

    #[test]
    fn test_display_or_nil() {
        assert_eq!(display_or_nil(None), NIL_REPR);

        let mut buffer = Buffer::new();
        buffer.write_string("content").unwrap();
        assert_eq!(display_or_nil(Some(&buffer)), "content");
    }

    #[test]
    fn test_first_small_write_allocates_minimum() {
        let mut buffer = Buffer::new();
        assert_eq!(buffer.write_string("hello").unwrap(), 5);
        assert_eq!(buffer.cap(), MIN_CAPACITY);
        assert_eq!(buffer.size(), 5);
        assert_eq!(buffer.pos(), 0);
        assert_eq!(buffer.as_bytes(), b"hello");
    }

    #[test]
    fn test_first_large_write_allocates_exact() {
        let mut buffer = Buffer::new();
        buffer.write_bytes(&[7u8; 100]).unwrap();
        assert_eq!(buffer.cap(), 100);
        assert_eq!(buffer.size(), 100);
    }

    #[test]
    fn test_write_into_slack_keeps_capacity() {
        let mut buffer = Buffer::new();
        buffer.write_string("abc").unwrap();
        buffer.write_string("def").unwrap();
        assert_eq!(buffer.cap(), MIN_CAPACITY);
        assert_eq!(buffer.as_bytes(), b"abcdef");
    }

    #[test]
    fn test_write_line_returns_length_with_delimiter() {
        let mut buffer = Buffer::new();
        assert_eq!(buffer.write_line("alpha").unwrap(), 6);
        assert_eq!(buffer.as_bytes(), b"alpha\n");
    }

    #[test]
    fn test_three_lines_then_end_of_data() {
        let mut buffer = Buffer::new();
        for word in ["alpha", "beta", "gamma"] {
            buffer.write_line(word).unwrap();
        }

        for expected in ["alpha", "beta", "gamma"] {
            let line = buffer.read_line();
            assert_eq!(line.as_bytes(), expected.as_bytes());
            assert_eq!(line.status(), LineStatus::Complete);
        }

        let line = buffer.read_line();
        assert!(line.is_empty());
        assert!(line.is_end_of_data());
        assert_eq!(buffer.pos(), buffer.size());
    }

    #[test]
    fn test_read_line_strips_crlf() {
        let mut buffer = Buffer::new();
        buffer.write_string("one\r\ntwo\r\n\r\na\rb\n").unwrap();

        assert_eq!(buffer.read_line().as_bytes(), b"one");
        assert_eq!(buffer.read_line().as_bytes(), b"two");
        assert_eq!(buffer.read_line().as_bytes(), b"");
        assert_eq!(buffer.read_line().as_bytes(), b"a\rb");
    }

    #[test]
    fn test_read_line_strips_single_cr_only() {
        let mut buffer = Buffer::new();
        buffer.write_string("x\r\r\n").unwrap();
        assert_eq!(buffer.read_line().as_bytes(), b"x\r");
    }

    #[test]
    fn test_unterminated_remainder_is_returned_verbatim() {
        let mut buffer = Buffer::new();
        buffer.write_string("head\ntail\r").unwrap();

        let line = buffer.read_line();
        assert_eq!(line.as_bytes(), b"head");
        assert!(line.is_complete());

        let line = buffer.read_line();
        assert_eq!(line.as_bytes(), b"tail\r");
        assert_eq!(line.status(), LineStatus::EndOfData);
        assert_eq!(buffer.pos(), buffer.size());
    }

    #[test]
    fn test_terminated_content_ends_with_empty_end_of_data() {
        let mut buffer = Buffer::new();
        buffer.write_string("a\n").unwrap();

        let line = buffer.read_line();
        assert_eq!(line.as_bytes(), b"a");
        assert!(line.is_complete());

        let line = buffer.read_line();
        assert!(line.is_empty());
        assert!(line.is_end_of_data());
    }

    #[test]
    fn test_empty_line_is_distinct_from_end_of_data() {
        let mut buffer = Buffer::new();
        buffer.write_string("a\n\n").unwrap();

        assert_eq!(buffer.read_line().as_bytes(), b"a");

        let line = buffer.read_line();
        assert!(line.is_empty());
        assert!(line.is_complete());

        let line = buffer.read_line();
        assert!(line.is_empty());
        assert!(line.is_end_of_data());
    }

    #[test]
    fn test_read_on_empty_buffer() {
        let mut buffer = Buffer::new();
        let line = buffer.read_line();
        assert!(line.is_empty());
        assert!(line.is_end_of_data());
        assert_eq!(buffer.pos(), 0);
    }

    #[test]
    fn test_lines_iterator() {
        let mut buffer = Buffer::new();
        buffer.write_string("a\n\nb").unwrap();
        let lines: Vec<String> = buffer.lines().collect();
        assert_eq!(lines, vec!["a", "", "b"]);

        let mut buffer = Buffer::new();
        buffer.write_string("a\r\n").unwrap();
        let lines: Vec<String> = buffer.lines().collect();
        assert_eq!(lines, vec!["a"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_rewind_rereads_content() {
        let mut buffer = Buffer::new();
        buffer.write_line("first").unwrap();
        buffer.write_line("second").unwrap();
        let size = buffer.size();

        assert_eq!(buffer.read_line().as_bytes(), b"first");
        buffer.rewind();

        assert_eq!(buffer.pos(), 0);
        assert_eq!(buffer.size(), size);
        assert_eq!(buffer.as_bytes(), b"first\nsecond\n");
        assert_eq!(buffer.read_line().as_bytes(), b"first");
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut buffer = Buffer::new();
        buffer.write_line("something").unwrap();
        buffer.read_line();
        buffer.clear();

        assert_eq!(buffer.size(), 0);
        assert_eq!(buffer.pos(), 0);
        assert!(buffer.as_bytes().is_empty());
        assert_eq!(buffer.cap(), MIN_CAPACITY);
    }

    #[test]
    fn test_reclaim_after_everything_read() {
        let mut buffer = Buffer::new();
        buffer.write_line(&"x".repeat(60)).unwrap();
        assert_eq!(buffer.cap(), MIN_CAPACITY);
        assert_eq!(buffer.size(), 61);

        assert_eq!(buffer.read_line().len(), 60);
        assert_eq!(buffer.pos(), 61);

        buffer.write_string("0123456789").unwrap();
        assert_eq!(buffer.cap(), MIN_CAPACITY);
        assert_eq!(buffer.pos(), 0);
        assert_eq!(buffer.size(), 10);
        assert_eq!(buffer.as_bytes(), b"0123456789");
    }

    #[test]
    fn test_reclaim_with_slack_left() {
        let mut buffer = Buffer::new();
        buffer.write_line("ab").unwrap();
        assert_eq!(buffer.read_line().as_bytes(), b"ab");
        assert_eq!(buffer.pos(), 3);

        buffer.write_string("cd").unwrap();
        assert_eq!(buffer.cap(), MIN_CAPACITY);
        assert_eq!(buffer.pos(), 0);
        assert_eq!(buffer.size(), 2);
        assert_eq!(buffer.as_bytes(), b"cd");
    }

    #[test]
    fn test_slide_unread_window_to_front() {
        let mut buffer = Buffer::new();
        buffer.write_line(&"x".repeat(49)).unwrap();
        buffer.write_string("abcdef").unwrap();
        assert_eq!(buffer.size(), 56);

        assert_eq!(buffer.read_line().len(), 49);
        assert_eq!(buffer.pos(), 50);

        buffer.write_string("0123456789").unwrap();
        assert_eq!(buffer.cap(), MIN_CAPACITY);
        assert_eq!(buffer.pos(), 0);
        assert_eq!(buffer.size(), 16);
        assert_eq!(buffer.as_bytes(), b"abcdef0123456789");
    }

    #[test]
    fn test_reallocate_doubles_plus_request() {
        let mut buffer = Buffer::new();
        buffer.write_string(&"a".repeat(40)).unwrap();
        buffer.write_string(&"b".repeat(40)).unwrap();

        assert_eq!(buffer.cap(), 2 * MIN_CAPACITY + 40);
        assert_eq!(buffer.size(), 80);
        assert_eq!(buffer.pos(), 0);
        assert_eq!(&buffer.as_bytes()[..40], "a".repeat(40).as_bytes());
        assert_eq!(&buffer.as_bytes()[40..], "b".repeat(40).as_bytes());
    }

    #[test]
    fn test_reallocate_drops_consumed_prefix() {
        let mut buffer = Buffer::new();
        buffer.write_line("hello").unwrap();
        buffer.write_string(&"z".repeat(58)).unwrap();
        assert_eq!(buffer.size(), MIN_CAPACITY);

        assert_eq!(buffer.read_line().as_bytes(), b"hello");
        let before = buffer.as_bytes().to_vec();

        buffer.write_string(&"q".repeat(10)).unwrap();
        assert_eq!(buffer.cap(), 2 * MIN_CAPACITY + 10);
        assert_eq!(buffer.pos(), 0);
        assert_eq!(buffer.size(), 68);
        assert_eq!(&buffer.as_bytes()[..58], before.as_slice());
    }

    #[test]
    fn test_long_line_after_small_start() {
        let mut buffer = Buffer::new();
        buffer.write_line("seed").unwrap();
        assert_eq!(buffer.cap(), MIN_CAPACITY);
        buffer.read_line();

        let long = "x".repeat(1000);
        buffer.write_line(&long).unwrap();
        assert!(buffer.cap() >= 1001);

        let line = buffer.read_line();
        assert_eq!(line.as_bytes(), long.as_bytes());
        assert!(line.is_complete());
        assert!(buffer.read_line().is_end_of_data());
    }

    #[test]
    fn test_limit_clamps_growth_then_fails() {
        let mut buffer = Buffer::with_max_capacity(128);
        buffer.write_bytes(&[b'a'; 100]).unwrap();
        assert_eq!(buffer.cap(), 100);

        buffer.write_bytes(&[b'b'; 20]).unwrap();
        assert_eq!(buffer.cap(), 128);
        assert_eq!(buffer.size(), 120);

        let err = buffer.write_bytes(&[b'c'; 20]).unwrap_err();
        assert_eq!(
            err,
            BufferError::TooLarge {
                requested: 140,
                max: 128
            }
        );

        // Failed writes leave the buffer untouched.
        assert_eq!(buffer.cap(), 128);
        assert_eq!(buffer.size(), 120);
        assert_eq!(buffer.pos(), 0);
        assert_invariants(&buffer);
    }

    #[test]
    fn test_limit_slides_when_doubling_is_not_allowed() {
        let mut buffer = Buffer::with_max_capacity(128);
        buffer.write_line(&"a".repeat(63)).unwrap();
        buffer.write_line(&"b".repeat(63)).unwrap();
        assert_eq!(buffer.cap(), 128);

        buffer.read_line();
        buffer.write_line(&"c".repeat(9)).unwrap();

        assert_eq!(buffer.cap(), 128);
        assert_eq!(buffer.pos(), 0);
        assert_eq!(buffer.size(), 74);
        let expected = format!("{}\n{}\n", "b".repeat(63), "c".repeat(9));
        assert_eq!(buffer.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn test_tiny_limit_skips_minimum_allocation() {
        let mut buffer = Buffer::with_max_capacity(8);
        buffer.write_string("abc").unwrap();
        assert_eq!(buffer.cap(), 3);
        assert!(buffer.write_string("defghi").is_err());
        assert_eq!(buffer.as_bytes(), b"abc");
    }

    #[test]
    fn test_doubled_capacity_overflow() {
        assert_eq!(doubled_capacity(64, 10), Some(138));
        assert_eq!(doubled_capacity(usize::MAX / 2 + 1, 0), None);
        assert_eq!(doubled_capacity(usize::MAX / 2, 2), None);
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let err = Buffer::allocate(usize::MAX, usize::MAX).unwrap_err();
        assert!(matches!(err, BufferError::TooLarge { .. }));
    }

    #[test]
    fn test_io_write_impl() {
        let mut buffer = Buffer::new();
        write!(buffer, "{}-{}", 1, 2).unwrap();
        writeln!(buffer, "!").unwrap();
        assert_eq!(buffer.as_bytes(), b"1-2!\n");

        let mut small = Buffer::with_max_capacity(2);
        let err = small.write_all(b"toolong").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::OutOfMemory);
    }

    #[test]
    fn test_from_bytes() {
        let buffer = Buffer::from_bytes(b"a\nb").unwrap();
        assert_eq!(buffer.size(), 3);
        assert_eq!(buffer.to_string(), "a\nb");
    }

    #[test]
    fn test_write_to_file_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        std::fs::write(&path, "OLD").unwrap();

        let mut buffer = Buffer::from_bytes(b"NEW").unwrap();
        buffer.write_to_file(&path, false).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "NEW");
    }

    #[test]
    fn test_write_to_file_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        std::fs::write(&path, "OLD").unwrap();

        let mut buffer = Buffer::from_bytes(b"NEW").unwrap();
        buffer.write_to_file(&path, true).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "OLDNEW");
    }

    #[test]
    fn test_write_to_file_creates_and_writes_consumed_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.txt");

        let mut buffer = Buffer::new();
        buffer.write_line("one").unwrap();
        buffer.write_line("two").unwrap();
        buffer.read_line();
        assert_eq!(buffer.pos(), 4);

        buffer.write_to_file(&path, true).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
        assert_eq!(buffer.pos(), 0);
    }

    #[test]
    fn test_write_to_file_open_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing/dir/out.txt");

        let mut buffer = Buffer::new();
        buffer.write_line("data").unwrap();
        buffer.read_line();

        let err = buffer.write_to_file(&path, false).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Io(IoError::OpenFailed { .. })
        ));
        // Cursor only moves once the file is open.
        assert_eq!(buffer.pos(), 5);
    }
}
