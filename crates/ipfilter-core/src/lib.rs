//! IPv4 range matching engine.
//!
//! This crate answers one question quickly: is an address inside any of the
//! hosts, masked networks or arbitrary ranges added so far?
//!
//! - **[`RangeIndex`]**: 32 prefix buckets, one per CIDR length, queried by
//!   masking and binary search
//! - **[`decompose`]**: splits `[from, to]` into the fewest aligned CIDR blocks
//! - **[`FrozenRangeIndex`]**: read-only snapshot for shared lookups
//! - **Errors**: [`FilterError::InvalidAddress`] for malformed dotted-decimal text
//!
//! # Example
//!
//! ```rust
//! use ipfilter_core::{decompose, Address, RangeIndex};
//!
//! let mut index = RangeIndex::new();
//! index.add_range("10.0.0.10", "10.0.0.20")?;
//!
//! let blocks: Vec<String> = decompose("10.0.0.10".parse()?, "10.0.0.20".parse()?)
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(blocks, ["10.0.0.10/31", "10.0.0.12/30", "10.0.0.16/30", "10.0.0.20/32"]);
//!
//! let frozen = index.freeze();
//! assert!(frozen.contains(Address::from_octets(10, 0, 0, 16))?);
//! # Ok::<(), ipfilter_core::FilterError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/ipfilter-core/0.1.0")]

mod address;
mod block;
mod bucket;
mod error;
mod frozen;
mod index;
pub mod mask;

pub use address::{Address, IntoAddress};
pub use block::{decompose, Block};
pub use bucket::PrefixBucket;
pub use error::{FilterError, Result};
pub use frozen::FrozenRangeIndex;
pub use index::RangeIndex;
