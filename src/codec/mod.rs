//! Compression wrappers for buffer content.

pub mod pack;

pub use pack::{
    gunzip_base64, gunzip_base64_into, gunzip_bytes, gunzip_file, gzip_base64, gzip_bytes,
    gzip_file,
};
