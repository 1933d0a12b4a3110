//! Packing of single bits into bytes and back.
//!
//! Bits fill each byte from the most significant end. The final byte is
//! padded with zero bits, and the number of padding bits travels alongside
//! the bytes so the reader can drop them again.

use {crate::error::FormatError, bitvec::prelude::*};

/// Bytes produced by a [`BitWriter`], plus how many trailing bits of the
/// last byte are padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PackedBits {
    pub(crate) bytes: Vec<u8>,
    pub(crate) padding: u8,
}

#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn extend(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    pub(crate) fn len(&self) -> usize {
        self.bits.len()
    }

    pub(crate) fn finish(mut self) -> PackedBits {
        let padding = (8 - self.bits.len() % 8) % 8;
        self.bits.resize(self.bits.len() + padding, false);
        PackedBits {
            bytes: self.bits.into_vec(),
            padding: padding as u8,
        }
    }
}

#[derive(Debug)]
pub(crate) struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Reads the meaningful bits of `bytes`, whose last byte ends in
    /// `padding` zero bits.
    pub(crate) fn new(bytes: &'a [u8], padding: u8) -> Result<Self, FormatError> {
        if padding > 7 || (bytes.is_empty() && padding != 0) {
            return Err(FormatError::InvalidPadding(padding));
        }
        let all = bytes.view_bits::<Msb0>();
        let (bits, tail) = all.split_at(all.len() - padding as usize);
        if tail.any() {
            return Err(FormatError::NonZeroPadding);
        }
        Ok(BitReader { bits, position: 0 })
    }

    pub(crate) fn read_bit(&mut self) -> Result<bool, FormatError> {
        let bit = match self.bits.get(self.position) {
            Some(bit) => *bit,
            None => {
                return Err(FormatError::OutOfBits {
                    requested: 1,
                    available: 0,
                })
            }
        };
        self.position += 1;
        Ok(bit)
    }

    pub(crate) fn read_bits(
        &mut self,
        count: usize,
    ) -> Result<&'a BitSlice<u8, Msb0>, FormatError> {
        if count > self.remaining() {
            return Err(FormatError::OutOfBits {
                requested: count,
                available: self.remaining(),
            });
        }
        let bits = &self.bits[self.position..self.position + count];
        self.position += count;
        Ok(bits)
    }

    /// Number of bits read so far.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
