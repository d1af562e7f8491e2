//! Textual address lists.
//!
//! Three list shapes share one separator scheme: entries are split on `,`,
//! trimmed, and empty entries are skipped.
//!
//! | list    | entry             | example                                   |
//! |---------|-------------------|-------------------------------------------|
//! | single  | `address`         | `8.8.8.8,127.0.0.1`                       |
//! | masked  | `address;mask`    | `10.11.0.0;255.255.0.0,192.168.1.0;255.255.255.0` |
//! | range   | `from-to`         | `10.0.0.10-10.0.0.20`                     |

use ipfilter_core::RangeIndex;

use crate::error::PolicyError;
use crate::Result;

/// Entry separator shared by every list shape.
pub const ENTRY_SEPARATOR: char = ',';

/// Separates address from mask inside a masked entry.
pub const MASK_SEPARATOR: char = ';';

/// Separates the endpoints of a range entry.
pub const RANGE_SEPARATOR: char = '-';

/// Non-empty, trimmed entries of a list.
pub fn entries(list: &str) -> impl Iterator<Item = &str> {
    list.split(ENTRY_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Add every address of a single-address list. Returns the entry count.
pub fn add_single_list(index: &mut RangeIndex, list: &str) -> Result<usize> {
    let mut added = 0;
    for entry in entries(list) {
        index.add(entry)?;
        added += 1;
    }
    Ok(added)
}

/// Add every `address;mask` entry. Returns the entry count.
pub fn add_masked_list(index: &mut RangeIndex, list: &str) -> Result<usize> {
    let mut added = 0;
    for entry in entries(list) {
        let (address, mask) = entry
            .split_once(MASK_SEPARATOR)
            .ok_or_else(|| malformed(entry, "expected `address;mask`"))?;
        index.add_masked(address, mask)?;
        added += 1;
    }
    Ok(added)
}

/// Add every `from-to` entry. Returns the entry count.
pub fn add_range_list(index: &mut RangeIndex, list: &str) -> Result<usize> {
    let mut added = 0;
    for entry in entries(list) {
        let (from, to) = entry
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| malformed(entry, "expected `from-to`"))?;
        index.add_range(from, to)?;
        added += 1;
    }
    Ok(added)
}

fn malformed(entry: &str, reason: &'static str) -> PolicyError {
    PolicyError::MalformedEntry {
        entry: entry.to_string(),
        reason,
    }
}
