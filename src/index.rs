use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
};

use tracing::{debug, warn};

use crate::{
    constants::MAX_KMER_LEN,
    encoder::{KmerEncoder, TwoBitEncoder},
    table::KmerTable,
    util::key_space,
    KmerError, Result,
};

/// Splits `seq` into consecutive, non-overlapping windows of length `k`.
///
/// The last window is shorter than `k` when `seq.len()` is not a multiple of
/// `k`. Each item is `(offset, window)`.
///
/// # Errors
///
/// * `KmerError::InvalidKmerLength` – if `k` is zero.
pub fn windows(seq: &[u8], k: usize) -> Result<impl Iterator<Item = (usize, &[u8])>> {
    if k == 0 {
        return Err(KmerError::InvalidKmerLength);
    }
    Ok(seq.chunks(k).enumerate().map(move |(i, w)| (i * k, w)))
}

/// Parameters of a [`KmerIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Window length `L`.
    pub k: usize,
    /// Slot count; `None` sizes the table to exactly `4^k`.
    pub capacity: Option<usize>,
}

impl IndexConfig {
    pub fn new(k: usize) -> Self {
        Self { k, capacity: None }
    }

    /// Overrides the slot count. It must still cover `4^k` keys.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Smallest capacity able to address every key of a `k`-length window.
    pub fn required_capacity(&self) -> Result<usize> {
        key_space(self.k).ok_or(KmerError::CapacityOverflow { k: self.k })
    }
}

/// Result of looking up one query window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The window's key was indexed; `slot` equals the key.
    Found { slot: usize },
    /// Well-formed window whose key was never indexed.
    NotFound,
    /// The window could not be encoded.
    Malformed(KmerError),
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { slot } => write!(f, "{slot}"),
            Self::NotFound => f.write_str("-1"),
            Self::Malformed(e) => write!(f, "malformed: {e}"),
        }
    }
}

/// One query window and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHit {
    pub offset: usize,
    pub window: String,
    pub outcome: QueryOutcome,
}

/// Window-slicing driver around a [`KmerTable`].
///
/// Sequences are cut into non-overlapping windows of `k` symbols, each window
/// is encoded and its key inserted into (or looked up in) the table.
///
/// Keys only identify a window together with its length (`"AT"` and `"AAAT"`
/// both encode to 1), so windows shorter than `k` go to a separate table per
/// length, sized `4^len`, and a query window only matches windows of its own
/// length.
#[derive(Debug)]
pub struct KmerIndex<E: KmerEncoder = TwoBitEncoder> {
    k: usize,
    encoder: E,
    table: KmerTable,                   // full-length windows
    tails: BTreeMap<usize, KmerTable>, // shorter windows, keyed by length
}

impl KmerIndex {
    /// Builds an empty index using the 2-bit encoder.
    pub fn new(config: IndexConfig) -> Result<Self> {
        Self::with_encoder(config, TwoBitEncoder)
    }
}

impl<E: KmerEncoder> KmerIndex<E> {
    /// Builds an empty index with a custom encoder.
    ///
    /// # Errors
    ///
    /// * `KmerError::InvalidKmerLength` – `k` is zero.
    /// * `KmerError::KmerTooLong` – `k` exceeds `MAX_KMER_LEN`.
    /// * `KmerError::CapacityOverflow` – `4^k` does not fit in a `usize`.
    /// * `KmerError::InvalidCapacity` – the capacity override is zero.
    /// * `KmerError::CapacityTooSmall` – the capacity override is below `4^k`.
    /// * `KmerError::AllocationFailed` – the table cannot be allocated.
    pub fn with_encoder(config: IndexConfig, encoder: E) -> Result<Self> {
        if config.k == 0 {
            return Err(KmerError::InvalidKmerLength);
        }
        if config.k > MAX_KMER_LEN {
            return Err(KmerError::KmerTooLong { len: config.k });
        }
        let required = config.required_capacity()?;
        let capacity = config.capacity.unwrap_or(required);
        if capacity == 0 {
            return Err(KmerError::InvalidCapacity);
        }
        if capacity < required {
            return Err(KmerError::CapacityTooSmall { capacity, required });
        }

        Ok(Self {
            k: config.k,
            encoder,
            table: KmerTable::new(capacity)?,
            tails: BTreeMap::new(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Table of the full-length windows.
    pub fn table(&self) -> &KmerTable {
        &self.table
    }

    /// Tables of the windows shorter than `k`, by window length.
    pub fn tail_tables(&self) -> impl Iterator<Item = (usize, &KmerTable)> + '_ {
        self.tails.iter().map(|(&len, table)| (len, table))
    }

    /// Total number of windows indexed, full and short.
    pub fn windows_indexed(&self) -> usize {
        self.table.len() + self.tails.values().map(KmerTable::len).sum::<usize>()
    }

    fn table_for(&self, len: usize) -> Option<&KmerTable> {
        if len == self.k {
            Some(&self.table)
        } else {
            self.tails.get(&len)
        }
    }

    fn table_for_mut(&mut self, len: usize) -> Result<&mut KmerTable> {
        if len == self.k {
            return Ok(&mut self.table);
        }
        match self.tails.entry(len) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let capacity = key_space(len).ok_or(KmerError::CapacityOverflow { k: len })?;
                Ok(e.insert(KmerTable::new(capacity)?))
            }
        }
    }

    /// Inserts the key of every window of `seq` and returns the number of
    /// windows inserted.
    ///
    /// Stops at the first window that fails to encode; windows before it stay
    /// inserted. The error position is relative to the start of `seq`.
    pub fn insert_sequence(&mut self, seq: &[u8]) -> Result<usize> {
        let mut inserted = 0usize;
        for (offset, window) in windows(seq, self.k)? {
            let key = self
                .encoder
                .encode(window)
                .map_err(|e| at_offset(e, offset))?;
            self.table_for_mut(window.len())?.insert(key)?;
            inserted += 1;
        }
        debug!(
            windows = inserted,
            total = self.windows_indexed(),
            "indexed sequence"
        );
        Ok(inserted)
    }

    /// Looks up every window of `seq`.
    ///
    /// Windows that fail to encode are reported as
    /// [`QueryOutcome::Malformed`]; table errors abort the query.
    pub fn query(&self, seq: &[u8]) -> Result<Vec<QueryHit>> {
        let mut hits = Vec::with_capacity(seq.len().div_ceil(self.k));
        for (offset, window) in windows(seq, self.k)? {
            let outcome = match self.encoder.encode(window) {
                Ok(key) => match self.table_for(window.len()) {
                    Some(table) => match table.search(key)? {
                        Some(slot) => QueryOutcome::Found { slot },
                        None => QueryOutcome::NotFound,
                    },
                    None => QueryOutcome::NotFound,
                },
                Err(e) => {
                    let e = at_offset(e, offset);
                    warn!(offset, error = %e, "malformed query window");
                    QueryOutcome::Malformed(e)
                }
            };
            hits.push(QueryHit {
                offset,
                window: String::from_utf8_lossy(window).into_owned(),
                outcome,
            });
        }
        Ok(hits)
    }
}

// Rebase a window-relative symbol position onto the whole sequence.
fn at_offset(e: KmerError, offset: usize) -> KmerError {
    match e {
        KmerError::InvalidSymbol { symbol, position } => KmerError::InvalidSymbol {
            symbol,
            position: position + offset,
        },
        other => other,
    }
}
