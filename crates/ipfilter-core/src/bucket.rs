//! Storage for every entry of one prefix length.

use crate::mask::mask_for;

/// Masked addresses sharing one prefix length.
///
/// Values are appended unsorted and sorted lazily on the first lookup after
/// a mutation, so a build phase full of `add` calls costs one sort in total.
#[derive(Debug, Clone)]
pub struct PrefixBucket {
    prefix_len: u8,
    mask: u32,
    values: Vec<u32>,
    sorted: bool,
}

impl PrefixBucket {
    /// Empty bucket for `prefix_len` (`1..=32`).
    ///
    /// # Panics
    ///
    /// Panics if `prefix_len` has no canonical mask. The index only ever
    /// constructs buckets from its own table.
    #[must_use]
    pub fn new(prefix_len: u8) -> Self {
        let mask = mask_for(prefix_len).expect("prefix length within 1..=32");
        Self {
            prefix_len,
            mask,
            values: Vec::new(),
            sorted: false,
        }
    }

    #[must_use]
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    #[must_use]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Stored entries, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn add(&mut self, value: u32) {
        self.values.push(value & self.mask);
        self.sorted = false;
    }

    /// Whether `value` falls inside any stored block.
    pub fn contains(&mut self, value: u32) -> bool {
        if !self.sorted {
            self.values.sort_unstable();
            self.sorted = true;
        }
        self.values.binary_search(&(value & self.mask)).is_ok()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.sorted = false;
    }

    /// Stored network values in storage order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    /// Sorted, deduplicated values, consuming the bucket.
    #[must_use]
    pub fn into_sorted(mut self) -> Vec<u32> {
        if !self.sorted {
            self.values.sort_unstable();
        }
        self.values.dedup();
        self.values
    }
}
