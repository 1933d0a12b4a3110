//! Lossless compression of byte buffers with Huffman coding.
//!
//! ```
//! let file = huffpack::compress(b"aaabbc");
//! let bytes = file.to_bytes();
//!
//! let file = huffpack::CompressedFile::from_bytes(&bytes)?;
//! assert_eq!(huffpack::decompress(&file)?, b"aaabbc");
//! # Ok::<(), huffpack::FormatError>(())
//! ```
//!
//! See [`CompressedFile`] for the byte layout.

mod bits;
mod coding;
mod error;
mod format;
mod frequency;
mod tree;

use crate::{
    bits::BitWriter,
    coding::{CodeTable, DecodeTrie},
    frequency::ByteFrequency,
    tree::HuffmanTree,
};

pub use crate::{error::FormatError, format::CompressedFile};

/// Compresses `bytes`. Empty input gives a file with no symbols and no body.
///
/// The output depends only on the input: nodes of equal weight are merged
/// in the order they entered the queue, leaves first in ascending byte order.
pub fn compress(bytes: &[u8]) -> CompressedFile {
    let byte_frequency = ByteFrequency::of(bytes);
    log::trace!("Byte frequency: {:?}", byte_frequency);

    let tree = match HuffmanTree::of(&byte_frequency) {
        Some(tree) => tree,
        None => {
            log::debug!("Empty input, nothing to encode");
            return CompressedFile::new(CodeTable::empty(), BitWriter::new().finish());
        }
    };
    log::trace!("Huffman tree: {:?}", tree);
    assert_eq!(tree.weight(), bytes.len());

    let coding = CodeTable::of(&tree);
    log::trace!("Huffman coding: {:?}", coding);

    let mut bits = BitWriter::new();
    for &byte in bytes {
        bits.extend(&coding[byte]);
    }
    log::debug!(
        "Encoded {} bytes with {} symbols into {} bits",
        bytes.len(),
        coding.len(),
        bits.len()
    );

    CompressedFile::new(coding, bits.finish())
}

/// Restores the bytes `file` was compressed from.
///
/// The code table is checked in full before any body bit is read, and the
/// body must end exactly on a code boundary followed by its zero padding.
pub fn decompress(file: &CompressedFile) -> Result<Vec<u8>, FormatError> {
    let trie = DecodeTrie::of(file.table())?;
    let mut bits = file.body_bits()?;
    let out = trie.decode(&mut bits)?;
    if out.is_empty() && file.symbol_count() > 0 {
        return Err(FormatError::MissingBody {
            symbols: file.symbol_count(),
        });
    }
    log::debug!(
        "Decoded {} bits into {} bytes",
        file.encoded_bits(),
        out.len()
    );
    Ok(out)
}
