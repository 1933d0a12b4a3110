use {
    huffpack::{compress, decompress, CompressedFile},
    proptest::prelude::*,
    quickcheck::TestResult,
    quickcheck_macros::quickcheck,
    std::{cmp::Reverse, collections::BinaryHeap},
};

fn frequencies(bytes: &[u8]) -> [usize; 256] {
    let mut frequencies = [0; 256];
    for &byte in bytes {
        frequencies[byte as usize] += 1;
    }
    frequencies
}

/// Weighted path length of an optimal prefix code: the sum of every merge.
fn reference_cost(weights: impl IntoIterator<Item = usize>) -> usize {
    let mut heap: BinaryHeap<_> = weights.into_iter().map(Reverse).collect();
    let mut cost = 0;
    while let (Some(Reverse(a)), Some(Reverse(b))) = (heap.pop(), heap.pop()) {
        cost += a + b;
        heap.push(Reverse(a + b));
    }
    cost
}

fn encoded_cost(file: &CompressedFile, bytes: &[u8]) -> usize {
    let frequencies = frequencies(bytes);
    file.symbols()
        .map(|(byte, code)| frequencies[byte as usize] * code.len())
        .sum()
}

#[quickcheck]
fn roundtrip(bytes: Vec<u8>) -> bool {
    bytes == decompress(&compress(&bytes)).unwrap()
}

#[quickcheck]
fn roundtrip_through_bytes(bytes: Vec<u8>) -> bool {
    let file = CompressedFile::from_bytes(&compress(&bytes).to_bytes()).unwrap();
    bytes == decompress(&file).unwrap()
}

#[quickcheck]
fn deterministic(bytes: Vec<u8>) -> bool {
    compress(&bytes).to_bytes() == compress(&bytes).to_bytes()
}

#[quickcheck]
fn truncated_body_never_decodes_to_input(bytes: Vec<u8>) -> TestResult {
    if bytes.is_empty() {
        return TestResult::discard();
    }
    let mut packed = compress(&bytes).to_bytes();
    packed.pop();
    let decoded = CompressedFile::from_bytes(&packed).and_then(|file| decompress(&file));
    TestResult::from_bool(decoded != Ok(bytes))
}

proptest! {
    #[test]
    fn codes_are_prefix_free(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
        let file = compress(&bytes);
        let codes: Vec<_> = file.symbols().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                prop_assert!(i == j || !b.starts_with(*a), "{:?} is a prefix of {:?}", a, b);
            }
        }
    }

    #[test]
    fn padding_fills_the_last_byte(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
        let file = compress(&bytes);
        let total_bits = encoded_cost(&file, &bytes);
        prop_assert_eq!(file.encoded_bits(), total_bits);
        prop_assert_eq!(file.padding() as usize, (8 - total_bits % 8) % 8);
        prop_assert_eq!(file.body().len(), (total_bits + 7) / 8);
    }

    #[test]
    fn weighted_length_is_optimal(bytes in prop::collection::vec(0..6u8, 2..256)) {
        let frequencies = frequencies(&bytes);
        let weights: Vec<usize> = frequencies.iter().copied().filter(|&f| f > 0).collect();
        prop_assume!(weights.len() > 1);

        let file = compress(&bytes);
        prop_assert_eq!(encoded_cost(&file, &bytes), reference_cost(weights));
    }

    #[test]
    fn one_symbol_one_bit_each(byte in any::<u8>(), len in 1..2048usize) {
        let bytes = vec![byte; len];
        let file = compress(&bytes);
        let symbols: Vec<_> = file.symbols().map(|(byte, code)| (byte, code.len())).collect();
        prop_assert_eq!(symbols, vec![(byte, 1)]);
        prop_assert_eq!(file.encoded_bits(), len);
        prop_assert_eq!(decompress(&file).unwrap(), bytes);
    }
}
