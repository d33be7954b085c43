//! Grid persistence.
//!
//! # File Format
//!
//! A save file is the grid's cells bit-packed with no header:
//!
//! ```text
//! ceil(width * height / 8) bytes
//!   bit index = y * width + x
//!   bit i lives in byte i / 8 at position i % 8 (LSB-first)
//!   padding bits of the final byte are unspecified
//! ```
//!
//! The format carries no dimensions, so the reader must size the target grid
//! before loading.

mod file;
mod format;

use std::io;

pub use file::{load_from_path, save_to_path};
pub use format::{load_grid, pack_grid, packed_len, save_grid, unpack_into};

use crate::compute::BitIndexError;

/// Errors raised while saving or loading a grid.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Bit buffer mismatch: {0}")]
    Bits(#[from] BitIndexError),
}
