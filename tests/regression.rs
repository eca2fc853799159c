//! Regression tests over a fixed 3,949 bp genomic sequence indexed with
//! non-overlapping 4-mers. If the encoding or windowing is intentionally
//! changed, update these expected values.

use kmer_table::{IndexConfig, KmerIndex, QueryOutcome, Result};

// ==== Fixed parameters ====
const REFERENCE: &str = include_str!("data/reference.txt");
const QUERY: &[u8] = b"CTGAGCTACTATC";
const K: usize = 4;

fn build() -> Result<KmerIndex> {
    let mut idx = KmerIndex::new(IndexConfig::new(K))?;
    let windows = idx.insert_sequence(REFERENCE.trim().as_bytes())?;
    assert_eq!(windows, 988);
    Ok(idx)
}

/// Shape of the tables after indexing: 987 full windows over 228 occupied
/// slots, plus the one-symbol tail "T" in its own table.
#[test]
fn regression_table_shape() -> Result<()> {
    let idx = build()?;
    let table = idx.table();
    assert_eq!(table.capacity(), 256);
    assert_eq!(table.len(), 987);
    assert_eq!(table.occupied().count(), 228);
    assert_eq!(idx.windows_indexed(), 988);
    let tails: Vec<(usize, Vec<(usize, usize)>)> = idx
        .tail_tables()
        .map(|(len, t)| (len, t.occupied().map(|(s, c)| (s, c.count())).collect()))
        .collect();
    assert_eq!(tails, vec![(1, vec![(1, 1)])]);
    // "AAAA" is the most repeated window
    assert_eq!(table.chain_len(0)?, 21);
    assert_eq!(table.chain_len(177)?, 2); // GCAT
    Ok(())
}

/// The three full windows of the query hit; the short tail "C" shares key 3
/// with "AAAC" but no one-symbol "C" window was indexed.
#[test]
fn regression_query() -> Result<()> {
    let idx = build()?;
    let hits = idx.query(QUERY)?;
    let got: Vec<(&str, &QueryOutcome)> =
        hits.iter().map(|h| (h.window.as_str(), &h.outcome)).collect();
    assert_eq!(
        got,
        vec![
            ("CTGA", &QueryOutcome::Found { slot: 216 }),
            ("GCTA", &QueryOutcome::Found { slot: 180 }),
            ("CTAT", &QueryOutcome::Found { slot: 209 }),
            ("C", &QueryOutcome::NotFound),
        ]
    );
    Ok(())
}

/// The dump lists slots in order; slot 1 only holds key 1.
#[test]
fn regression_dump() -> Result<()> {
    let idx = build()?;
    let dump = idx.table().dump();
    assert_eq!(dump.len(), 256);
    assert!(dump.iter().enumerate().all(|(i, (slot, _))| i == *slot));
    assert!(dump[1].1.iter().all(|&k| k == 1));
    let rendered = idx.table().to_string();
    assert_eq!(rendered.lines().count(), 256);
    assert!(rendered.starts_with("Index 0: (0) -> (0) -> "));
    Ok(())
}
