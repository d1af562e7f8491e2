//! Quantified containment properties of the range index.

use ipfilter_core::{decompose, Address, RangeIndex};
use proptest::prelude::*;

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

proptest! {
    #[test]
    fn dotted_text_round_trips(o0: u8, o1: u8, o2: u8, o3: u8) {
        let text = format!("{o0}.{o1}.{o2}.{o3}");
        let parsed = Address::parse(&text).unwrap();
        prop_assert_eq!(Address::parse(&parsed.to_string()).unwrap(), parsed);
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn added_host_stays_contained(host: u32, others in prop::collection::vec(any::<u32>(), 0..20)) {
        let mut index = RangeIndex::new();
        index.add(host).unwrap();
        prop_assert!(index.contains(host).unwrap());

        for (i, other) in others.iter().enumerate() {
            if i % 2 == 0 {
                index.add(*other).unwrap();
            } else {
                index.add_range(*other, other.wrapping_add(1000)).unwrap();
            }
            prop_assert!(index.contains(host).unwrap());
        }
    }

    #[test]
    fn range_is_covered_exactly(
        a: u32,
        b: u32,
        samples in prop::collection::vec(any::<u32>(), 64),
    ) {
        let (low, high) = ordered(a, b);
        let mut index = RangeIndex::new();
        index.add_range(low, high).unwrap();

        for sample in samples {
            let inside = (low..=high).contains(&sample);
            prop_assert_eq!(index.contains(sample).unwrap(), inside);
        }
        prop_assert!(index.contains(low).unwrap());
        prop_assert!(index.contains(high).unwrap());
        if low > 0 {
            prop_assert!(!index.contains(low - 1).unwrap());
        }
        if high < u32::MAX {
            prop_assert!(!index.contains(high + 1).unwrap());
        }
    }

    #[test]
    fn narrow_range_every_member(start: u32, width in 0u32..300) {
        let end = start.saturating_add(width);
        let mut index = RangeIndex::new();
        index.add_range(start, end).unwrap();
        for x in start..=end {
            prop_assert!(index.contains(x).unwrap());
        }
    }

    #[test]
    fn range_order_is_irrelevant(a: u32, b: u32) {
        prop_assert_eq!(
            decompose(Address::new(a), Address::new(b)),
            decompose(Address::new(b), Address::new(a))
        );
    }

    #[test]
    fn decomposition_is_aligned_and_contiguous(a: u32, b: u32) {
        let (low, high) = ordered(a, b);
        let blocks = decompose(Address::new(low), Address::new(high));

        prop_assert!(blocks.len() <= 62);
        let mut next = u64::from(low);
        for block in &blocks {
            prop_assert_eq!(u64::from(block.first().value()), next);
            prop_assert_eq!(block.network().value() & !block.mask(), 0);
            next = u64::from(block.last().value()) + 1;
        }
        prop_assert_eq!(next, u64::from(high) + 1);
    }

    #[test]
    fn repeated_masked_add_changes_nothing(
        net: u32,
        prefix_len in 1u8..=32,
        samples in prop::collection::vec(any::<u32>(), 32),
    ) {
        let mut once = RangeIndex::new();
        once.add_prefix(net, prefix_len).unwrap();
        let mut twice = RangeIndex::new();
        twice.add_prefix(net, prefix_len).unwrap();
        twice.add_prefix(net, prefix_len).unwrap();

        for sample in samples.into_iter().chain([net]) {
            prop_assert_eq!(
                once.contains(sample).unwrap(),
                twice.contains(sample).unwrap()
            );
        }
    }

    #[test]
    fn clear_forgets_everything(
        hosts in prop::collection::vec(any::<u32>(), 1..20),
        a: u32,
        b: u32,
    ) {
        let mut index = RangeIndex::new();
        for host in &hosts {
            index.add(*host).unwrap();
        }
        index.add_range(a, b).unwrap();
        index.clear();

        prop_assert!(index.is_empty());
        for host in hosts {
            prop_assert!(!index.contains(host).unwrap());
        }
        prop_assert!(!index.contains(a).unwrap());
    }

    #[test]
    fn frozen_agrees_with_mutable(
        a: u32,
        b: u32,
        hosts in prop::collection::vec(any::<u32>(), 0..10),
        samples in prop::collection::vec(any::<u32>(), 32),
    ) {
        let mut index = RangeIndex::new();
        index.add_range(a, b).unwrap();
        for host in &hosts {
            index.add(*host).unwrap();
        }
        let frozen = index.clone().freeze();

        for sample in samples.into_iter().chain(hosts) {
            prop_assert_eq!(
                frozen.contains(sample).unwrap(),
                index.contains(sample).unwrap()
            );
        }
    }
}
