use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// Occurrence count of every byte value in one input.
pub(crate) struct ByteFrequency {
    bytes: [usize; u8::MAX as usize + 1],
}

impl Index<u8> for ByteFrequency {
    type Output = usize;

    fn index(&self, index: u8) -> &usize {
        &self.bytes[index as usize]
    }
}

impl IndexMut<u8> for ByteFrequency {
    fn index_mut(&mut self, index: u8) -> &mut Self::Output {
        &mut self.bytes[index as usize]
    }
}

impl Default for ByteFrequency {
    fn default() -> Self {
        Self { bytes: [0; 256] }
    }
}

// Only the bytes that actually occur; 256 zeroes make for an unreadable trace.
impl fmt::Debug for ByteFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.present()).finish()
    }
}

impl ByteFrequency {
    pub(crate) fn of(bytes: &[u8]) -> Self {
        let mut this = ByteFrequency::default();
        for &byte in bytes {
            this[byte] += 1;
        }
        this
    }

    /// Bytes with a non-zero count, in ascending byte order.
    pub(crate) fn present(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.bytes
            .iter()
            .enumerate()
            .filter(|&(_, &frequency)| frequency > 0)
            .map(|(byte, &frequency)| (byte as u8, frequency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_byte() {
        let frequency = ByteFrequency::of(b"aaabbc");
        assert_eq!(
            frequency.present().collect::<Vec<_>>(),
            vec![(b'a', 3), (b'b', 2), (b'c', 1)]
        );
        assert_eq!(frequency[b'z'], 0);
    }

    #[test]
    fn empty_input_has_no_symbols() {
        assert!(ByteFrequency::of(&[]).present().next().is_none());
    }
}
