use thiserror::Error;

/// A compressed file that cannot be decoded.
///
/// Decoding either succeeds completely or fails with one of these;
/// no partially decoded output is ever handed back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("truncated {what}: needed {expected} bytes, found {found}")]
    Truncated {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("symbol count {0} exceeds the 256 possible byte values")]
    TooManySymbols(u32),
    #[error("symbol {symbol:#04x} declares a code length of 0")]
    EmptyCode { symbol: u8 },
    #[error("symbol {0:#04x} appears more than once in the code table")]
    DuplicateSymbol(u8),
    #[error("code for symbol {symbol:#04x} collides with the prefix of another code")]
    NotPrefixFree { symbol: u8 },
    #[error("padding bit count {0} is invalid for this body")]
    InvalidPadding(u8),
    #[error("padding bits are not all zero")]
    NonZeroPadding,
    #[error("requested {requested} bits but only {available} remain")]
    OutOfBits { requested: usize, available: usize },
    #[error("bit {position} of the body does not continue any code")]
    UnknownCode { position: usize },
    #[error("body ends {dangling} bits into an incomplete code")]
    IncompleteCode { dangling: usize },
    #[error("code table declares {symbols} symbols but the body is empty")]
    MissingBody { symbols: usize },
    #[error("code table is empty but the body has {bytes} bytes")]
    UnexpectedBody { bytes: usize },
}
