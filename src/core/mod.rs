//! Core domain types for linebuf.
//!
//! The [`Buffer`] lives here: a growable byte container with a read cursor,
//! line-oriented reads and writes, and file persistence.

pub mod buffer;

pub use buffer::{
    Buffer, DEFAULT_MAX_CAPACITY, Line, LineStatus, Lines, MIN_CAPACITY, NIL_REPR, display_or_nil,
};
