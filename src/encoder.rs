use crate::{
    constants::{BITS_PER_SYMBOL, INVALID_SYMBOL, MAX_KMER_LEN},
    util::{key_space, nt2, symbol},
    KmerError, Result,
};

/// Maps a k-mer to its integer key.
///
/// Implementations must be injective over k-mers of equal length, since the
/// key is used as a table slot without further reduction.
pub trait KmerEncoder: Send + Sync + 'static {
    fn encode(&self, kmer: &[u8]) -> Result<u64>;
}

/// Default encoder: A=00, T=01, G=10, C=11, most significant symbol first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TwoBitEncoder;

impl KmerEncoder for TwoBitEncoder {
    /// Packs the symbols of `kmer` directly into a `u64`.
    ///
    /// Gives the same value as `bitstring_to_integer(&kmer_to_bitstring(kmer)?)`
    /// without building the intermediate string. The empty k-mer encodes to 0.
    fn encode(&self, kmer: &[u8]) -> Result<u64> {
        if kmer.len() > MAX_KMER_LEN {
            return Err(KmerError::KmerTooLong { len: kmer.len() });
        }
        let mut code = 0u64;
        for (position, &b) in kmer.iter().enumerate() {
            code = (code << BITS_PER_SYMBOL) | bits_at(b, position)? as u64;
        }
        Ok(code)
    }
}

#[inline(always)]
fn bits_at(b: u8, position: usize) -> Result<u8> {
    match nt2(b) {
        INVALID_SYMBOL => Err(KmerError::InvalidSymbol {
            symbol: b as char,
            position,
        }),
        bits => Ok(bits),
    }
}

/// Returns the 2-bit pattern of a single symbol.
///
/// # Errors
///
/// * `KmerError::InvalidSymbol` – `symbol` is not one of `A`, `T`, `G`, `C`
///   (reported at position 0).
pub fn symbol_to_bits(symbol: u8) -> Result<u8> {
    bits_at(symbol, 0)
}

/// Returns the symbol for a 2-bit pattern; the upper bits of `bits` are ignored.
pub fn bits_to_symbol(bits: u8) -> char {
    symbol(bits) as char
}

/// Concatenates the 2-bit patterns of every symbol of `kmer` into a string of
/// `'0'`/`'1'` characters of length `2 * kmer.len()`.
///
/// # Errors
///
/// * `KmerError::InvalidSymbol` – with the position of the first offending symbol.
pub fn kmer_to_bitstring(kmer: &[u8]) -> Result<String> {
    let mut out = String::with_capacity(kmer.len() * BITS_PER_SYMBOL);
    for (position, &b) in kmer.iter().enumerate() {
        let bits = bits_at(b, position)?;
        out.push(if bits & 0b10 == 0 { '0' } else { '1' });
        out.push(if bits & 0b01 == 0 { '0' } else { '1' });
    }
    Ok(out)
}

/// Evaluates a base-2 digit string, most significant digit first.
///
/// The empty string evaluates to 0.
pub fn bitstring_to_integer(bits: &str) -> Result<u64> {
    digits_to_integer(bits, 2)
}

/// Evaluates a digit string in the given `radix` (2..=36), most significant
/// digit first, as `Σ digit_i · radix^(n-1-i)`.
///
/// # Errors
///
/// * `KmerError::InvalidRadix` – `radix` outside `2..=36`.
/// * `KmerError::InvalidDigit` – a character is not a digit of `radix`.
/// * `KmerError::IntegerOverflow` – the value does not fit in a `u64`.
pub fn digits_to_integer(digits: &str, radix: u32) -> Result<u64> {
    if !(2..=36).contains(&radix) {
        return Err(KmerError::InvalidRadix(radix));
    }
    digits
        .chars()
        .enumerate()
        .try_fold(0u64, |acc, (position, digit)| {
            let d = digit.to_digit(radix).ok_or(KmerError::InvalidDigit {
                digit,
                position,
                radix,
            })?;
            acc.checked_mul(radix as u64)
                .and_then(|v| v.checked_add(d as u64))
                .ok_or(KmerError::IntegerOverflow {
                    digits: digits.chars().count(),
                })
        })
}

/// Formats `value` as a base-2 string left-padded with zeros to `width` digits.
///
/// Values needing more than `width` digits are printed in full.
pub fn integer_to_bitstring(value: u64, width: usize) -> String {
    format!("{value:0width$b}")
}

/// Recovers the k-mer of length `len` whose key is `key`.
///
/// # Errors
///
/// * `KmerError::InvalidKmerLength` – `len` is zero.
/// * `KmerError::KmerTooLong` – `len` exceeds `MAX_KMER_LEN`.
/// * `KmerError::KeyOutOfRange` – `key >= 4^len`, so no k-mer of that length maps to it.
pub fn decode(key: u64, len: usize) -> Result<String> {
    if len == 0 {
        return Err(KmerError::InvalidKmerLength);
    }
    if len > MAX_KMER_LEN {
        return Err(KmerError::KmerTooLong { len });
    }
    if len < MAX_KMER_LEN && key >> (len * BITS_PER_SYMBOL) != 0 {
        return Err(KmerError::KeyOutOfRange {
            key,
            capacity: key_space(len).unwrap_or(usize::MAX),
        });
    }
    Ok((0..len)
        .rev()
        .map(|i| bits_to_symbol((key >> (i * BITS_PER_SYMBOL)) as u8))
        .collect())
}
