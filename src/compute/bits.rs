//! Flat bit vector used as the on-disk cell encoding.
//!
//! Bit `i` lives in byte `i / 8` at bit position `i % 8` (LSB-first).

use std::fmt;

/// Errors raised by checked bit access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitIndexError {
    #[error("Bit index {index} out of range for {size}-bit array")]
    OutOfRange { index: usize, size: usize },
    #[error("Buffer of {actual} bytes cannot hold {size} bits (expected {expected} bytes)")]
    Length {
        size: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Bit count mismatch: expected {expected} bits, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Packs boolean values one bit each into a byte buffer.
///
/// Padding bits past `len()` in the final byte are never addressed and carry
/// no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPacker {
    data: Vec<u8>,
    size: usize,
}

impl BitPacker {
    /// Number of bytes needed to hold `size` bits.
    #[inline]
    pub const fn bytes_for(size: usize) -> usize {
        size.div_ceil(8)
    }

    /// Create a zero-filled array of `size` bits.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; Self::bytes_for(size)],
            size,
        }
    }

    /// Wrap an existing byte buffer holding `size` bits.
    pub fn from_bytes(data: Vec<u8>, size: usize) -> Result<Self, BitIndexError> {
        let expected = Self::bytes_for(size);
        if data.len() != expected {
            return Err(BitIndexError::Length {
                size,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Number of addressable bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the backing buffer in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn locate(&self, index: usize) -> Result<(usize, u8), BitIndexError> {
        if index >= self.size {
            return Err(BitIndexError::OutOfRange {
                index,
                size: self.size,
            });
        }
        Ok((index / 8, 1u8 << (index % 8)))
    }

    /// Read bit `index`.
    pub fn get(&self, index: usize) -> Result<bool, BitIndexError> {
        let (byte, mask) = self.locate(index)?;
        Ok(self.data[byte] & mask != 0)
    }

    /// Write bit `index`.
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), BitIndexError> {
        let (byte, mask) = self.locate(index)?;
        if value {
            self.data[byte] |= mask;
        } else {
            self.data[byte] &= !mask;
        }
        Ok(())
    }

    /// Flip bit `index`.
    pub fn invert(&mut self, index: usize) -> Result<(), BitIndexError> {
        let (byte, mask) = self.locate(index)?;
        self.data[byte] ^= mask;
        Ok(())
    }

    /// Complement every byte, padding bits included.
    pub fn invert_all(&mut self) {
        for byte in &mut self.data {
            *byte = !*byte;
        }
    }

    /// Iterate over the addressable bits in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |i| self.data[i / 8] & (1u8 << (i % 8)) != 0)
    }
}

impl FromIterator<bool> for BitPacker {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut data = Vec::new();
        let mut size = 0;
        for bit in iter {
            if size % 8 == 0 {
                data.push(0);
            }
            if bit {
                data[size / 8] |= 1 << (size % 8);
            }
            size += 1;
        }
        Self { data, size }
    }
}

impl fmt::Display for BitPacker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, bit) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", bit as u8)?;
        }
        write!(f, "}}")
    }
}
