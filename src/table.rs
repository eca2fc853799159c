use std::fmt;

use tracing::{debug, trace};

use crate::{KmerError, Result};

/// One entry of a collision chain. Each node owns the next one.
#[derive(Debug)]
struct ChainNode {
    key: u64,
    next: Option<Box<ChainNode>>,
}

impl ChainNode {
    fn new(key: u64) -> Box<Self> {
        Box::new(Self { key, next: None })
    }
}

/// Fixed-size direct-address table with per-slot collision chains.
///
/// A key is stored in the slot whose index equals the key itself, so a slot's
/// chain only ever holds repeated insertions of one key. The table never
/// deduplicates, never removes and never resizes.
#[derive(Debug)]
pub struct KmerTable {
    slots: Vec<Option<Box<ChainNode>>>, // head of each slot's chain
    len: usize,                         // total number of nodes
}

impl KmerTable {
    /// Creates a table with `capacity` empty slots.
    ///
    /// # Errors
    ///
    /// * `KmerError::InvalidCapacity` – if `capacity` is zero.
    /// * `KmerError::AllocationFailed` – if the slot array cannot be allocated.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(KmerError::InvalidCapacity);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| KmerError::AllocationFailed { capacity })?;
        slots.resize_with(capacity, || None);
        debug!(capacity, "created k-mer table");
        Ok(Self { slots, len: 0 })
    }

    /// Number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Total number of stored keys, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `key` to the tail of the chain in slot `key`.
    ///
    /// # Errors
    ///
    /// * `KmerError::KeyOutOfRange` – if `key >= capacity`.
    pub fn insert(&mut self, key: u64) -> Result<()> {
        let slot = validate_key!(key, self.capacity());

        let mut cursor = &mut self.slots[slot];
        let mut depth = 0usize;
        while let Some(node) = cursor {
            cursor = &mut node.next;
            depth += 1;
        }
        *cursor = Some(ChainNode::new(key));
        self.len += 1;

        trace!(key, depth, "inserted key");
        Ok(())
    }

    /// Looks `key` up in its slot's chain.
    ///
    /// Returns `Some(slot)` when the key was inserted at least once. Since the
    /// table is direct-addressed the slot always equals `key`.
    ///
    /// # Errors
    ///
    /// * `KmerError::KeyOutOfRange` – if `key >= capacity`.
    pub fn search(&self, key: u64) -> Result<Option<usize>> {
        let slot = validate_key!(key, self.capacity());
        let found = self.iter_slot(slot).any(|k| k == key);
        Ok(found.then_some(slot))
    }

    /// Boolean form of [`KmerTable::search`].
    pub fn contains(&self, key: u64) -> Result<bool> {
        self.search(key).map(|slot| slot.is_some())
    }

    /// Iterates over the keys stored in slot `key`, in insertion order.
    ///
    /// # Errors
    ///
    /// * `KmerError::KeyOutOfRange` – if `key >= capacity`.
    pub fn chain(&self, key: u64) -> Result<Chain<'_>> {
        let slot = validate_key!(key, self.capacity());
        Ok(self.iter_slot(slot))
    }

    /// Number of times `key` has been inserted.
    pub fn chain_len(&self, key: u64) -> Result<usize> {
        self.chain(key).map(Iterator::count)
    }

    /// Non-empty slots in index order, each with its chain.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Chain<'_>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, head)| head.is_some())
            .map(|(slot, head)| (slot, Chain { node: head.as_deref() }))
    }

    /// Every slot in index order with the keys of its chain in insertion order.
    ///
    /// Empty slots are listed with an empty key list.
    pub fn dump(&self) -> Vec<(usize, Vec<u64>)> {
        (0..self.capacity())
            .map(|slot| (slot, self.iter_slot(slot).collect()))
            .collect()
    }

    #[inline]
    fn iter_slot(&self, slot: usize) -> Chain<'_> {
        Chain {
            node: self.slots[slot].as_deref(),
        }
    }
}

impl fmt::Display for KmerTable {
    /// One line per slot: `Index 3: (3) -> (3) -> None`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in 0..self.capacity() {
            write!(f, "Index {slot}: ")?;
            for key in self.iter_slot(slot) {
                write!(f, "({key}) -> ")?;
            }
            writeln!(f, "None")?;
        }
        Ok(())
    }
}

impl Drop for KmerTable {
    // Unlink chains node by node; the default recursive drop can exhaust the
    // stack on long chains.
    fn drop(&mut self) {
        for head in &mut self.slots {
            let mut next = head.take();
            while let Some(mut node) = next {
                next = node.next.take();
            }
        }
    }
}

/// Iterator over the keys of one collision chain.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    node: Option<&'a ChainNode>,
}

impl Iterator for Chain<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(node.key)
    }
}
