#![allow(clippy::unreadable_literal)]

// Alphabet and key-width limits for the 2-bit k-mer encoding.

// `ASCII_SIZE` – Entries in a byte-indexed lookup table.
pub const ASCII_SIZE: usize = 256;

// `INVALID_SYMBOL` – Marker stored in `SYMBOL_BITS` for bytes outside the alphabet.
pub const INVALID_SYMBOL: u8 = 4;

// `BITS_PER_SYMBOL` – Width of one encoded nucleotide.
pub const BITS_PER_SYMBOL: usize = 2;

/// Longest k-mer whose key still fits in a `u64` (2 bits × 32 = 64 bits).
pub const MAX_KMER_LEN: usize = 64 / BITS_PER_SYMBOL;

/// 2-bit encoding table for nucleotide symbols. Maps ASCII characters to:
/// A=00, T=01, G=10, C=11, any other character=4 (invalid).
///
/// Only upper-case symbols are part of the alphabet.
pub const SYMBOL_BITS: [u8; ASCII_SIZE] = {
    // Initialize all entries to 4 (invalid).
    let mut t = [INVALID_SYMBOL; ASCII_SIZE];

    t[b'A' as usize] = 0b00;
    t[b'T' as usize] = 0b01;
    t[b'G' as usize] = 0b10;
    t[b'C' as usize] = 0b11;

    t
};

/// Reverse of `SYMBOL_BITS`: 2-bit pattern → ASCII symbol.
pub const BITS_SYMBOL: [u8; 4] = [b'A', b'T', b'G', b'C'];
