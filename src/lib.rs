//! Direct-addressed k-mer table.
//!
//! K-mers over `{A, T, G, C}` are packed two bits per symbol
//! (A=00, T=01, G=10, C=11, most significant symbol first) into a dense key
//! in `[0, 4^L)`. The key is used as the slot index of a [`KmerTable`] without
//! any further reduction; repeated keys pile up in the slot's chain.

mod constants;
#[macro_use]
mod util;
mod encoder;
mod index;
mod table;

pub use constants::*;
pub use encoder::{
    KmerEncoder, TwoBitEncoder, bits_to_symbol, bitstring_to_integer, decode, digits_to_integer,
    integer_to_bitstring, kmer_to_bitstring, symbol_to_bits,
};
pub use index::{IndexConfig, KmerIndex, QueryHit, QueryOutcome, windows};
pub use table::{Chain, KmerTable};
pub use util::*;

/// Common `Result` type for all library operations, using `KmerError` for errors.
pub type Result<T, E = KmerError> = core::result::Result<T, E>;

/// Error variants for k-mer encoding and table operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KmerError {
    /// A k-mer contains a character outside `{A, T, G, C}`.
    #[error("invalid symbol {symbol:?} at position {position} (expected one of A, T, G, C)")]
    InvalidSymbol { symbol: char, position: usize },

    /// Thrown when a table is constructed with zero slots.
    #[error("table capacity must be > 0")]
    InvalidCapacity,

    /// A key does not address a slot of the table.
    ///
    /// This is a sizing defect: the table holds fewer than `4^L` slots.
    #[error("key {key} out of range for table of capacity {capacity}")]
    KeyOutOfRange { key: u64, capacity: usize },

    /// A digit string holds a character that is not a digit of the radix.
    #[error("invalid base-{radix} digit {digit:?} at position {position}")]
    InvalidDigit {
        digit: char,
        position: usize,
        radix: u32,
    },

    /// Radix outside `2..=36`.
    #[error("radix {0} not supported (must be 2..=36)")]
    InvalidRadix(u32),

    /// The value of a digit string does not fit in a `u64`.
    #[error("{digits}-digit value does not fit in 64 bits")]
    IntegerOverflow { digits: usize },

    /// Thrown when a k-mer is longer than `MAX_KMER_LEN`.
    #[error("k-mer of length {len} exceeds the maximum of {max}", max = MAX_KMER_LEN)]
    KmerTooLong { len: usize },

    /// Thrown when a window or decode length of zero is requested.
    #[error("k-mer length must be ≥ 1")]
    InvalidKmerLength,

    /// The table cannot address every key a window of the configured length produces.
    #[error("table capacity {capacity} is smaller than the {required} keys of the k-mer space")]
    CapacityTooSmall { capacity: usize, required: usize },

    /// The slot array of a table could not be allocated.
    #[error("cannot allocate a table of {capacity} slots")]
    AllocationFailed { capacity: usize },

    /// `4^k` does not fit in a `usize`.
    #[error("key space of {k}-mers does not fit in memory addressing")]
    CapacityOverflow { k: usize },
}
