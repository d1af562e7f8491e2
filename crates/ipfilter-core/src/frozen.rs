//! Read-only snapshot of a [`RangeIndex`].
//!
//! A mutable index sorts its buckets lazily, which needs `&mut self` on every
//! lookup. Freezing pays for all sorting once so lookups borrow immutably and
//! the snapshot can sit behind an `Arc` shared by request handlers.

use crate::address::IntoAddress;
use crate::block::Block;
use crate::bucket::PrefixBucket;
use crate::error::Result;
use crate::index::RangeIndex;
use crate::mask::PREFIX_LENS;

#[derive(Debug, Clone)]
struct Level {
    prefix_len: u8,
    mask: u32,
    networks: Box<[u32]>,
}

/// Sorted, deduplicated, immutable containment index.
#[derive(Debug, Clone, Default)]
pub struct FrozenRangeIndex {
    levels: Vec<Level>,
}

impl FrozenRangeIndex {
    pub(crate) fn from_buckets(buckets: [PrefixBucket; PREFIX_LENS]) -> Self {
        let levels = buckets
            .into_iter()
            .filter(|bucket| !bucket.is_empty())
            .map(|bucket| Level {
                prefix_len: bucket.prefix_len(),
                mask: bucket.mask(),
                networks: bucket.into_sorted().into_boxed_slice(),
            })
            .collect();
        Self { levels }
    }

    pub fn contains(&self, address: impl IntoAddress) -> Result<bool> {
        let value = address.into_address()?.value();
        Ok(self
            .levels
            .iter()
            .any(|level| level.networks.binary_search(&(value & level.mask)).is_ok()))
    }

    /// Distinct stored blocks
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.iter().map(|level| level.networks.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn active_prefix_lens(&self) -> impl Iterator<Item = u8> + '_ {
        self.levels.iter().map(|level| level.prefix_len)
    }

    /// Stored blocks, shortest prefix first and ascending within a prefix length.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.levels.iter().flat_map(|level| {
            level
                .networks
                .iter()
                .map(move |&network| Block::from_network(network, level.prefix_len))
        })
    }

    /// Back to a mutable index holding the same entries.
    #[must_use]
    pub fn thaw(self) -> RangeIndex {
        let mut index = RangeIndex::new();
        for level in self.levels {
            for &network in &*level.networks {
                index.insert(network, level.prefix_len);
            }
        }
        index
    }
}

impl From<RangeIndex> for FrozenRangeIndex {
    fn from(index: RangeIndex) -> Self {
        index.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RangeIndex {
        let mut index = RangeIndex::new();
        index.add("10.0.0.5").unwrap();
        index.add("10.0.0.5").unwrap();
        index.add_masked("192.168.1.0", "255.255.255.0").unwrap();
        index.add_range("10.0.0.10", "10.0.0.20").unwrap();
        index
    }

    #[test]
    fn test_answers_match_mutable_index() {
        let mut index = sample();
        let frozen = sample().freeze();

        for address in [
            "10.0.0.5",
            "10.0.0.6",
            "10.0.0.9",
            "10.0.0.10",
            "10.0.0.17",
            "10.0.0.20",
            "10.0.0.21",
            "192.168.1.77",
            "192.168.2.1",
        ] {
            assert_eq!(
                frozen.contains(address).unwrap(),
                index.contains(address).unwrap(),
                "{address}"
            );
        }
    }

    #[test]
    fn test_deduplicates() {
        let index = sample();
        assert_eq!(index.len(), 7);
        let frozen = index.freeze();
        assert_eq!(frozen.len(), 6);
        assert_eq!(frozen.active_prefix_lens().collect::<Vec<_>>(), vec![24, 30, 31, 32]);
    }

    #[test]
    fn test_blocks_sorted_within_level() {
        let frozen = sample().freeze();
        let hosts: Vec<String> = frozen
            .blocks()
            .filter(|b| b.prefix_len() == 32)
            .map(|b| b.to_string())
            .collect();
        assert_eq!(hosts, vec!["10.0.0.5/32", "10.0.0.20/32"]);
    }

    #[test]
    fn test_thaw_round_trip() {
        let mut thawed = sample().freeze().thaw();
        assert!(thawed.contains("10.0.0.12").unwrap());
        thawed.add("8.8.8.8").unwrap();
        assert!(thawed.contains("8.8.8.8").unwrap());
    }

    #[test]
    fn test_empty() {
        let frozen = RangeIndex::new().freeze();
        assert!(frozen.is_empty());
        assert!(!frozen.contains("1.2.3.4").unwrap());
        assert!(frozen.contains("1.2.3").is_err());
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<FrozenRangeIndex>();
    }
}
