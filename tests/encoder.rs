use kmer_table::{
    KmerEncoder, KmerError, Result, TwoBitEncoder, bitstring_to_integer, decode,
    kmer_to_bitstring,
};

#[test]
fn encode_at_and_gc() -> Result<()> {
    assert_eq!(kmer_to_bitstring(b"AT")?, "0001");
    assert_eq!(bitstring_to_integer("0001")?, 1);
    assert_eq!(TwoBitEncoder.encode(b"AT")?, 1);

    assert_eq!(kmer_to_bitstring(b"GC")?, "1011");
    assert_eq!(bitstring_to_integer("1011")?, 11);
    assert_eq!(TwoBitEncoder.encode(b"GC")?, 11);
    Ok(())
}

#[test]
fn bad_symbol_reports_position() {
    let err = TwoBitEncoder.encode(b"ACGTN").unwrap_err();
    assert_eq!(
        err,
        KmerError::InvalidSymbol {
            symbol: 'N',
            position: 4
        }
    );
    // lower case is not part of the alphabet
    assert!(kmer_to_bitstring(b"at").is_err());
}

#[test]
fn longest_kmer_fits() -> Result<()> {
    let all_c = [b'C'; 32];
    assert_eq!(TwoBitEncoder.encode(&all_c)?, u64::MAX);
    assert_eq!(decode(u64::MAX, 32)?, "C".repeat(32));
    assert_eq!(
        TwoBitEncoder.encode(&[b'A'; 33]),
        Err(KmerError::KmerTooLong { len: 33 })
    );
    Ok(())
}

#[test]
fn empty_kmer_is_zero() -> Result<()> {
    assert_eq!(TwoBitEncoder.encode(b"")?, 0);
    assert_eq!(bitstring_to_integer(&kmer_to_bitstring(b"")?)?, 0);
    Ok(())
}
