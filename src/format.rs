use {
    crate::{
        bits::{BitReader, BitWriter, PackedBits},
        coding::CodeTable,
        error::FormatError,
    },
    bitvec::prelude::*,
};

/// A code table plus the input bytes encoded with it.
///
/// Serialized as:
///
/// ```text
/// [symbol count: u32 LE]
/// symbol count times:
///     [symbol: u8]
///     [code length in bits: u32 LE]
///     [code bits: ceil(length / 8) bytes, zero padded]
/// [padding bit count: u8]
/// [body: packed code bits of every input byte, zero padded]
/// ```
///
/// Bits are packed most significant first.
///
/// Built by [`compress`](crate::compress) or parsed with
/// [`CompressedFile::from_bytes`], and consumed by
/// [`decompress`](crate::decompress).
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedFile {
    table: CodeTable,
    body: PackedBits,
}

impl CompressedFile {
    pub(crate) fn new(table: CodeTable, body: PackedBits) -> Self {
        CompressedFile { table, body }
    }

    pub(crate) fn table(&self) -> &CodeTable {
        &self.table
    }

    pub(crate) fn body_bits(&self) -> Result<BitReader<'_>, FormatError> {
        BitReader::new(&self.body.bytes, self.body.padding)
    }

    /// Every symbol with its code, in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.table.iter()
    }

    pub fn symbol_count(&self) -> usize {
        self.table.len()
    }

    /// Number of zero bits that pad out the last body byte.
    pub fn padding(&self) -> u8 {
        self.body.padding
    }

    pub fn body(&self) -> &[u8] {
        &self.body.bytes
    }

    /// Number of meaningful bits in the body.
    pub fn encoded_bits(&self) -> usize {
        self.body.bytes.len() * 8 - self.body.padding as usize
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.table.len() as u32).to_le_bytes());
        for (symbol, code) in self.table.iter() {
            out.push(symbol);
            out.extend_from_slice(&(code.len() as u32).to_le_bytes());
            let mut bits = BitWriter::new();
            bits.extend(code);
            out.extend(bits.finish().bytes);
        }
        out.push(self.body.padding);
        out.extend_from_slice(&self.body.bytes);
        log::debug!(
            "Serialized {} symbols and {} body bytes into {} bytes",
            self.table.len(),
            self.body.bytes.len(),
            out.len()
        );
        out
    }

    /// Parses and validates everything except the prefix-freeness of the
    /// codes, which [`decompress`](crate::decompress) checks while building
    /// its decode trie.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut cursor = Cursor { bytes };

        let count = cursor.u32("symbol count")?;
        if count > 256 {
            return Err(FormatError::TooManySymbols(count));
        }

        let mut table = CodeTable::empty();
        for _ in 0..count {
            let symbol = cursor.u8("symbol")?;
            let length = cursor.u32("code length")?;
            if length == 0 {
                return Err(FormatError::EmptyCode { symbol });
            }
            let packed = cursor.take("code bits", packed_len(length))?;
            let padding = (packed.len() * 8 - length as usize) as u8;
            let code = BitReader::new(packed, padding)?.read_bits(length as usize)?;
            table.insert(symbol, code.to_bitvec().into_boxed_bitslice())?;
        }

        let padding = cursor.u8("padding bit count")?;
        let body = PackedBits {
            bytes: cursor.bytes.to_vec(),
            padding,
        };
        BitReader::new(&body.bytes, body.padding)?;
        if table.is_empty() && !body.bytes.is_empty() {
            return Err(FormatError::UnexpectedBody {
                bytes: body.bytes.len(),
            });
        }
        if !table.is_empty() && body.bytes.is_empty() {
            return Err(FormatError::MissingBody {
                symbols: table.len(),
            });
        }

        log::trace!("Parsed code table: {:?}", table);
        Ok(CompressedFile { table, body })
    }
}

fn packed_len(bit_len: u32) -> usize {
    (bit_len / 8) as usize + if bit_len % 8 == 0 { 0 } else { 1 }
}

struct Cursor<'a> {
    bytes: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn take(&mut self, what: &'static str, count: usize) -> Result<&'a [u8], FormatError> {
        if self.bytes.len() < count {
            return Err(FormatError::Truncated {
                what,
                expected: count,
                found: self.bytes.len(),
            });
        }
        let (head, rest) = self.bytes.split_at(count);
        self.bytes = rest;
        Ok(head)
    }

    fn u8(&mut self, what: &'static str) -> Result<u8, FormatError> {
        Ok(self.take(what, 1)?[0])
    }

    fn u32(&mut self, what: &'static str) -> Result<u32, FormatError> {
        let mut word = [0; 4];
        word.copy_from_slice(self.take(what, 4)?);
        Ok(u32::from_le_bytes(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_bits_round_up_to_bytes() {
        assert_eq!(packed_len(1), 1);
        assert_eq!(packed_len(8), 1);
        assert_eq!(packed_len(9), 2);
        assert_eq!(packed_len(255), 32);
    }

    #[test]
    fn cursor_reports_shortfall() {
        let mut cursor = Cursor { bytes: &[1, 0, 0] };
        assert_eq!(
            cursor.u32("symbol count"),
            Err(FormatError::Truncated {
                what: "symbol count",
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn cursor_reads_little_endian() {
        let mut cursor = Cursor {
            bytes: &[0x04, 0x03, 0x02, 0x01, 0xAA],
        };
        assert_eq!(cursor.u32("word"), Ok(0x0102_0304));
        assert_eq!(cursor.u8("byte"), Ok(0xAA));
        assert!(cursor.bytes.is_empty());
    }
}
