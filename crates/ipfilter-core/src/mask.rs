//! The fixed mapping between prefix lengths and their 32-bit masks.

/// Number of distinct prefix lengths (`/1` through `/32`).
pub const PREFIX_LENS: usize = 32;

/// Shortest prefix length with a canonical mask.
pub const MIN_PREFIX_LEN: u8 = 1;

/// Prefix length of a single host.
pub const HOST_PREFIX_LEN: u8 = 32;

/// `MASKS[L - 1]` is the mask with `L` leading one bits.
const MASKS: [u32; PREFIX_LENS] = build_masks();

const fn build_masks() -> [u32; PREFIX_LENS] {
    let mut masks = [0u32; PREFIX_LENS];
    let mut mask = 0u32;
    let mut i = 0;
    while i < PREFIX_LENS {
        mask = (mask >> 1) | 0x8000_0000;
        masks[i] = mask;
        i += 1;
    }
    masks
}

/// Mask for prefix length `prefix_len`, or `None` outside `1..=32`.
#[must_use]
pub const fn mask_for(prefix_len: u8) -> Option<u32> {
    if prefix_len < MIN_PREFIX_LEN || prefix_len > HOST_PREFIX_LEN {
        return None;
    }
    Some(MASKS[prefix_len as usize - 1])
}

/// Prefix length of a canonical mask, or `None` if `mask` has holes or is zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn prefix_len_of(mask: u32) -> Option<u8> {
    let ones = mask.leading_ones();
    if ones == 0 || mask.count_ones() != ones {
        return None;
    }
    Some(ones as u8)
}

/// Size in addresses of a block with this prefix length.
#[must_use]
pub const fn block_size(prefix_len: u8) -> u64 {
    1u64 << (HOST_PREFIX_LEN - prefix_len)
}
