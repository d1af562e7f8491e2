//! The multi-resolution containment index.

use tracing::debug;

use crate::address::{Address, IntoAddress};
use crate::block::{decompose, Block};
use crate::bucket::PrefixBucket;
use crate::error::Result;
use crate::frozen::FrozenRangeIndex;
use crate::mask::{mask_for, prefix_len_of, HOST_PREFIX_LEN, PREFIX_LENS};

/// Set of IPv4 addresses built from hosts, masked networks and ranges.
///
/// One [`PrefixBucket`] per prefix length holds the entries of that length;
/// a query masks the address once per non-empty bucket and binary searches it.
///
/// ```
/// use ipfilter_core::RangeIndex;
///
/// let mut index = RangeIndex::new();
/// index.add("10.0.0.5")?;
/// index.add_masked("192.168.1.0", "255.255.255.0")?;
/// index.add_range("10.0.0.10", "10.0.0.20")?;
///
/// assert!(index.contains("192.168.1.42")?);
/// assert!(index.contains("10.0.0.15")?);
/// assert!(!index.contains("10.0.0.21")?);
/// # Ok::<(), ipfilter_core::FilterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RangeIndex {
    buckets: [PrefixBucket; PREFIX_LENS],
    // Bit `L - 1` is set while the `/L` bucket holds anything.
    active: u32,
}

impl Default for RangeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeIndex {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new() -> Self {
        Self {
            buckets: std::array::from_fn(|i| PrefixBucket::new(i as u8 + 1)),
            active: 0,
        }
    }

    /// Add a single host.
    pub fn add(&mut self, address: impl IntoAddress) -> Result<()> {
        let address = address.into_address()?;
        self.insert(address.value(), HOST_PREFIX_LEN);
        Ok(())
    }

    /// Add the network `address & mask`.
    ///
    /// Both arguments are parsed before anything else, so malformed text
    /// always errors. A mask that is not one of the 32 canonical CIDR masks
    /// is ignored.
    pub fn add_masked(&mut self, address: impl IntoAddress, mask: impl IntoAddress) -> Result<()> {
        let address = address.into_address()?;
        let mask = mask.into_address()?;

        match prefix_len_of(mask.value()) {
            Some(prefix_len) => self.insert(address.value(), prefix_len),
            None => debug!(address = %address, mask = %mask, "ignoring non-canonical mask"),
        }
        Ok(())
    }

    /// Add the `/prefix_len` network containing `address`.
    ///
    /// Prefix lengths outside `1..=32` are ignored.
    pub fn add_prefix(&mut self, address: impl IntoAddress, prefix_len: u8) -> Result<()> {
        let address = address.into_address()?;

        if mask_for(prefix_len).is_some() {
            self.insert(address.value(), prefix_len);
        } else {
            debug!(address = %address, prefix_len, "ignoring out-of-range prefix length");
        }
        Ok(())
    }

    pub fn add_block(&mut self, block: Block) {
        self.insert(block.network().value(), block.prefix_len());
    }

    /// Add every address between `from` and `to` inclusive, in either order.
    ///
    /// The range is stored as its minimal CIDR cover (see [`decompose`]).
    pub fn add_range(&mut self, from: impl IntoAddress, to: impl IntoAddress) -> Result<()> {
        let from = from.into_address()?;
        let to = to.into_address()?;

        let blocks = decompose(from, to);
        debug!(from = %from, to = %to, blocks = blocks.len(), "range decomposed");
        for block in blocks {
            self.add_block(block);
        }
        Ok(())
    }

    /// Whether `address` falls inside anything added so far.
    ///
    /// Takes `&mut self` because buckets sort themselves on the first lookup
    /// after a mutation. Use [`RangeIndex::freeze`] for shared read access.
    pub fn contains(&mut self, address: impl IntoAddress) -> Result<bool> {
        let address = address.into_address()?;
        Ok(self.contains_value(address.value()))
    }

    fn contains_value(&mut self, value: u32) -> bool {
        let mut remaining = self.active;
        while remaining != 0 {
            let idx = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            if self.buckets[idx].contains(value) {
                return true;
            }
        }
        false
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.active = 0;
    }

    /// Stored entries across all buckets, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(PrefixBucket::len).sum()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Prefix lengths holding at least one entry, shortest first.
    pub fn active_prefix_lens(&self) -> impl Iterator<Item = u8> + '_ {
        self.buckets
            .iter()
            .filter(|bucket| !bucket.is_empty())
            .map(PrefixBucket::prefix_len)
    }

    /// Stored entries as blocks, grouped by prefix length (shortest first).
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.buckets.iter().flat_map(|bucket| {
            let prefix_len = bucket.prefix_len();
            bucket
                .iter()
                .map(move |network| Block::from_network(network, prefix_len))
        })
    }

    /// Sort and deduplicate every bucket into an immutable, shareable index.
    #[must_use]
    pub fn freeze(self) -> FrozenRangeIndex {
        FrozenRangeIndex::from_buckets(self.buckets)
    }

    pub(crate) fn insert(&mut self, value: u32, prefix_len: u8) {
        let idx = usize::from(prefix_len - 1);
        self.buckets[idx].add(value);
        self.active |= 1 << idx;
    }
}

impl Extend<Block> for RangeIndex {
    fn extend<I: IntoIterator<Item = Block>>(&mut self, iter: I) {
        for block in iter {
            self.add_block(block);
        }
    }
}

impl FromIterator<Block> for RangeIndex {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl FromIterator<Address> for RangeIndex {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        iter.into_iter().map(Block::host).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_host() {
        let mut index = RangeIndex::new();
        index.add("10.0.0.5").unwrap();
        assert!(index.contains("10.0.0.5").unwrap());
        assert!(!index.contains("10.0.0.6").unwrap());
    }

    #[test]
    fn test_masked_network() {
        let mut index = RangeIndex::new();
        index.add_masked("192.168.1.0", "255.255.255.0").unwrap();
        assert!(index.contains("192.168.1.42").unwrap());
        assert!(!index.contains("192.168.2.1").unwrap());
    }

    #[test]
    fn test_masked_entry_is_masked_on_insert() {
        let mut index = RangeIndex::new();
        index.add_masked("10.11.12.13", "255.255.0.0").unwrap();
        assert_eq!(
            index.blocks().map(|b| b.to_string()).collect::<Vec<_>>(),
            vec!["10.11.0.0/16"]
        );
        assert!(index.contains("10.11.200.1").unwrap());
    }

    #[test]
    fn test_numeric_forms() {
        let mut index = RangeIndex::new();
        index.add_masked(0x0A0B_0000_u32, 0xFFFF_0000_u32).unwrap();
        index.add(std::net::Ipv4Addr::new(8, 8, 8, 8)).unwrap();
        assert!(index.contains(0x0A0B_0102_u32).unwrap());
        assert!(index.contains(addr("8.8.8.8")).unwrap());
    }

    #[test]
    fn test_prefix_length() {
        let mut index = RangeIndex::new();
        index.add_prefix("172.16.0.0", 12).unwrap();
        assert!(index.contains("172.31.255.255").unwrap());
        assert!(!index.contains("172.32.0.0").unwrap());
    }

    #[test]
    fn test_non_canonical_mask_is_noop() {
        let mut index = RangeIndex::new();
        index.add_masked("10.0.0.0", "255.0.255.0").unwrap();
        index.add_masked("10.0.0.0", "0.0.0.0").unwrap();
        index.add_prefix("10.0.0.0", 0).unwrap();
        index.add_prefix("10.0.0.0", 33).unwrap();
        assert!(index.is_empty());
        assert!(!index.contains("10.0.0.0").unwrap());
    }

    #[test]
    fn test_malformed_mask_still_errors() {
        let mut index = RangeIndex::new();
        let err = index.add_masked("10.0.0.0", "255.255").unwrap_err();
        assert_eq!(err, FilterError::InvalidAddress("255.255".into()));
    }

    #[test]
    fn test_aligned_range() {
        let mut index = RangeIndex::new();
        index.add_range("10.0.0.0", "10.0.0.255").unwrap();
        assert!(index.contains("10.0.0.128").unwrap());
        assert!(!index.contains("10.0.1.0").unwrap());
        assert_eq!(index.active_prefix_lens().collect::<Vec<_>>(), vec![24]);
    }

    #[test]
    fn test_degenerate_range_matches_host_add() {
        let mut ranged = RangeIndex::new();
        ranged.add_range("10.0.0.1", "10.0.0.1").unwrap();
        let mut single = RangeIndex::new();
        single.add("10.0.0.1").unwrap();

        assert_eq!(ranged.blocks().collect::<Vec<_>>(), single.blocks().collect::<Vec<_>>());
        assert!(ranged.contains("10.0.0.1").unwrap());
        assert!(!ranged.contains("10.0.0.2").unwrap());
    }

    #[test]
    fn test_unaligned_range() {
        let mut index = RangeIndex::new();
        index.add_range("10.0.0.10", "10.0.0.20").unwrap();
        for last in 10..=20u8 {
            assert!(index.contains(Address::from_octets(10, 0, 0, last)).unwrap());
        }
        assert!(!index.contains("10.0.0.9").unwrap());
        assert!(!index.contains("10.0.0.21").unwrap());
    }

    #[test]
    fn test_range_spanning_whole_space() {
        let mut index = RangeIndex::new();
        index.add_range(Address::MAX, Address::MIN).unwrap();
        assert!(index.contains("0.0.0.0").unwrap());
        assert!(index.contains("127.255.255.255").unwrap());
        assert!(index.contains("255.255.255.255").unwrap());
    }

    #[test]
    fn test_invalid_text() {
        let mut index = RangeIndex::new();
        assert_eq!(
            index.add("10.0.0").unwrap_err(),
            FilterError::InvalidAddress("10.0.0".into())
        );
        assert!(index.add_range("10.0.0.1", "nope").is_err());
        assert!(index.contains("1.2.3").is_err());
        assert!(index.is_empty());
    }

    #[test]
    fn test_active_set_tracks_buckets() {
        let mut index = RangeIndex::new();
        assert!(index.is_empty());
        index.add("1.2.3.4").unwrap();
        index.add_prefix("10.0.0.0", 8).unwrap();
        assert_eq!(index.active_prefix_lens().collect::<Vec<_>>(), vec![8, 32]);
        assert_eq!(index.active, (1 << 7) | (1 << 31));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut index = RangeIndex::new();
        index.add("1.2.3.4").unwrap();
        index.add_range("10.0.0.0", "10.0.3.255").unwrap();
        assert!(index.contains("10.0.2.1").unwrap());

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(!index.contains("1.2.3.4").unwrap());
        assert!(!index.contains("10.0.2.1").unwrap());
    }

    #[test]
    fn test_duplicate_masked_add() {
        let mut index = RangeIndex::new();
        index.add_masked("10.11.0.0", "255.255.0.0").unwrap();
        index.add_masked("10.11.0.0", "255.255.0.0").unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.contains("10.11.5.5").unwrap());
        assert!(!index.contains("10.12.5.5").unwrap());
    }

    #[test]
    fn test_collect_from_blocks() {
        let index: RangeIndex = [
            Block::new(addr("10.0.0.0"), 8).unwrap(),
            Block::host(addr("192.0.2.1")),
        ]
        .into_iter()
        .collect();
        assert_eq!(index.len(), 2);

        let hosts: RangeIndex = [addr("1.1.1.1"), addr("9.9.9.9")].into_iter().collect();
        assert_eq!(hosts.active_prefix_lens().collect::<Vec<_>>(), vec![32]);
    }
}
