//! I/O utilities for linebuf.
//!
//! Provides file reading with memory mapping support for loading content
//! into a [`Buffer`](crate::core::Buffer), along with small filesystem helpers.

pub mod fs;
pub mod reader;

pub use fs::{
    append_file, change_extension, create_file, create_parent_dirs, delete_file, file_exists,
    write_file,
};
pub use reader::{FileReader, LoadedFile, checksum, load_file, read_file};
