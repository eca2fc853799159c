use crate::constants::{BITS_PER_SYMBOL, BITS_SYMBOL, SYMBOL_BITS};

/// Encodes a nucleotide ASCII byte into its 2-bit code (0‒3), or 4 for invalid.
///
/// Uses the `SYMBOL_BITS` table, which assigns:
/// - A → 0b00
/// - T → 0b01
/// - G → 0b10
/// - C → 0b11
/// - Any other ASCII byte → 4
#[inline(always)]
pub const fn nt2(b: u8) -> u8 {
    SYMBOL_BITS[b as usize]
}

/// Returns the ASCII symbol for a 2-bit pattern. Only the lower two bits of
/// `bits` are looked at.
#[inline(always)]
pub const fn symbol(bits: u8) -> u8 {
    BITS_SYMBOL[(bits & 0b11) as usize]
}

/// Number of distinct keys a k-mer of length `k` can produce, i.e. `4^k`.
///
/// Returns `None` when the value does not fit in a `usize`.
#[inline]
pub const fn key_space(k: usize) -> Option<usize> {
    let shift = k * BITS_PER_SYMBOL;
    if shift >= usize::BITS as usize {
        return None;
    }
    Some(1usize << shift)
}

/// Checks that `$key` addresses a slot of a table with `$capacity` slots and
/// returns early with `KmerError::KeyOutOfRange` otherwise.
///
/// Evaluates to the slot index as `usize`.
///
/// # Example
///
/// ```ignore
/// let slot = validate_key!(key, self.capacity());
/// ```
macro_rules! validate_key {
    ($key:expr, $capacity:expr) => {{
        let key: u64 = $key;
        let capacity: usize = $capacity;
        match usize::try_from(key) {
            Ok(slot) if slot < capacity => slot,
            _ => return Err(KmerError::KeyOutOfRange { key, capacity }),
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_tables_agree() {
        for &b in b"ATGC" {
            assert_eq!(symbol(nt2(b)), b);
        }
        assert_eq!(nt2(b'N'), 4);
        assert_eq!(nt2(b'a'), 4);
    }

    #[test]
    fn key_space_powers_of_four() {
        assert_eq!(key_space(0), Some(1));
        assert_eq!(key_space(1), Some(4));
        assert_eq!(key_space(4), Some(256));
        assert_eq!(key_space(usize::BITS as usize / 2), None);
    }
}
