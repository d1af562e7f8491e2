//! CIDR blocks and range-to-block decomposition.

use serde::Serialize;

use crate::address::Address;
use crate::mask::{block_size, mask_for, HOST_PREFIX_LEN};

/// An aligned, power-of-two sized run of addresses sharing a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Block {
    network: Address,
    prefix_len: u8,
}

impl Block {
    /// The block of length `prefix_len` containing `address`, or `None`
    /// when `prefix_len` is outside `1..=32`.
    #[must_use]
    pub fn new(address: Address, prefix_len: u8) -> Option<Self> {
        let mask = mask_for(prefix_len)?;
        Some(Self {
            network: Address::new(address.value() & mask),
            prefix_len,
        })
    }

    /// Caller guarantees `network` is already masked and `prefix_len` is valid.
    pub(crate) const fn from_network(network: u32, prefix_len: u8) -> Self {
        Self {
            network: Address::new(network),
            prefix_len,
        }
    }

    /// A `/32` block holding exactly `address`.
    #[must_use]
    pub const fn host(address: Address) -> Self {
        Self {
            network: address,
            prefix_len: HOST_PREFIX_LEN,
        }
    }

    #[must_use]
    pub const fn network(self) -> Address {
        self.network
    }

    #[must_use]
    pub const fn prefix_len(self) -> u8 {
        self.prefix_len
    }

    #[must_use]
    pub const fn mask(self) -> u32 {
        u32::MAX << (HOST_PREFIX_LEN - self.prefix_len)
    }

    #[must_use]
    pub const fn first(self) -> Address {
        self.network
    }

    #[must_use]
    pub const fn last(self) -> Address {
        Address::new(self.network.value() | !self.mask())
    }

    /// Number of addresses covered
    #[must_use]
    pub const fn size(self) -> u64 {
        block_size(self.prefix_len)
    }

    #[must_use]
    pub const fn contains(self, address: Address) -> bool {
        address.value() & self.mask() == self.network.value()
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// Cover `[from, to]` (either order) with the fewest CIDR blocks.
///
/// Walks upward from the low end, each time taking the largest block that
/// is aligned at the cursor and does not run past the high end. A single
/// address comes back as one `/32`. Blocks never exceed `/1`, so the full
/// address space yields two halves.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn decompose(from: Address, to: Address) -> Vec<Block> {
    let (low, high) = if from <= to { (from, to) } else { (to, from) };

    let end = u64::from(high.value());
    let mut cursor = u64::from(low.value());
    let mut blocks = Vec::new();

    while cursor <= end {
        let prefix_len = widest_prefix_at(cursor, end);
        blocks.push(Block::from_network(cursor as u32, prefix_len));
        cursor += block_size(prefix_len);
    }

    blocks
}

/// Shortest prefix length whose block starts exactly at `start` and ends at or before `end`.
#[allow(clippy::cast_possible_truncation)]
fn widest_prefix_at(start: u64, end: u64) -> u8 {
    // A /0 block has no canonical mask.
    let alignment = (start as u32).trailing_zeros().min(u32::from(HOST_PREFIX_LEN) - 1);
    let span = end - start + 1;
    let fits = 63 - span.leading_zeros();
    (u32::from(HOST_PREFIX_LEN) - alignment.min(fits)) as u8
}
