//! Bit-packed grid codec.

use std::io::{ErrorKind, Read, Write};

use super::StorageError;
use crate::compute::{BitIndexError, BitPacker, Grid};

/// Size in bytes of a saved `width x height` grid.
#[inline]
pub fn packed_len(width: usize, height: usize) -> usize {
    BitPacker::bytes_for(width * height)
}

/// Pack every cell of `grid` into a bit array of exactly `width * height` bits.
pub fn pack_grid(grid: &Grid) -> BitPacker {
    grid.cells().iter().map(|&cell| cell != 0).collect()
}

/// Overwrite every cell of `grid` from `bits`, which must hold one bit per cell.
pub fn unpack_into(bits: &BitPacker, grid: &mut Grid) -> Result<(), BitIndexError> {
    let size = grid.cells().len();
    if bits.len() != size {
        return Err(BitIndexError::SizeMismatch {
            expected: size,
            actual: bits.len(),
        });
    }
    for (cell, bit) in grid.cells_mut().iter_mut().zip(bits.iter()) {
        *cell = bit as u8;
    }
    Ok(())
}

/// Write `grid` to `w` as raw packed bits.
pub fn save_grid<W: Write>(grid: &Grid, w: &mut W) -> Result<(), StorageError> {
    let bits = pack_grid(grid);
    w.write_all(bits.as_bytes())?;
    Ok(())
}

/// Fill as much of `buf` as the reader provides, returning the byte count.
fn read_fully<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<usize, StorageError> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Read `packed_len(width, height)` bytes from `r` into `grid`.
///
/// The grid's current dimensions define how much is read. On a short read the
/// grid is left unchanged.
pub fn load_grid<R: Read>(grid: &mut Grid, r: &mut R) -> Result<(), StorageError> {
    let size = grid.cells().len();
    let expected = BitPacker::bytes_for(size);
    let mut data = vec![0u8; expected];

    let actual = read_fully(r, &mut data)?;
    if actual < expected {
        return Err(StorageError::ShortRead { expected, actual });
    }

    let bits = BitPacker::from_bytes(data, size)?;
    unpack_into(&bits, grid)?;
    Ok(())
}
