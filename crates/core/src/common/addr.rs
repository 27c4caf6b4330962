//! Memory address type and tag/index decomposition.
//!
//! This module defines the 32-bit address carried by every trace record and the
//! bit partitioning used to map it onto the cache. It provides the following:
//! 1. **Type Safety:** Keeps raw trace addresses apart from tags and set indices.
//! 2. **Geometry:** Offset, index, and tag widths derived from the cache dimensions.
//! 3. **Decoding:** The pure `address -> (tag, index)` mapping used on every access.

/// Width of a trace address in bits.
pub const ADDRESS_BITS: u32 = 32;

/// A 32-bit byte address taken from a trace record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u32);

/// Bit widths of the three address partitions.
///
/// Built from a validated [`CacheConfig`](crate::config::CacheConfig), so
/// `offset_bits + index_bits + tag_bits == 32` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Low bits selecting a byte within a block (`log2(block_size)`).
    pub offset_bits: u32,
    /// Bits selecting the set (`log2(num_sets)`); zero for a single set.
    pub index_bits: u32,
    /// Remaining high bits stored in each block.
    pub tag_bits: u32,
}

/// Tag and set index of an address under a particular [`Geometry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// High bits identifying which memory block occupies a cache block.
    pub tag: u32,
    /// Set the address maps to.
    pub index: u32,
}

impl Address {
    /// Creates an address from a raw 32-bit value.
    #[inline]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit value.
    #[inline]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Splits the address into its tag and set index.
    ///
    /// The offset bits are shifted out first; the low `index_bits` of what remains
    /// select the set and everything above them is the tag. With `index_bits == 0`
    /// (a single, fully associative set) the index is always 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use csim_core::common::{Address, Geometry};
    ///
    /// // 16 sets of 16-byte blocks: 4 offset bits, 4 index bits, 24 tag bits.
    /// let geometry = Geometry::new(16, 16);
    /// let decoded = Address::new(0x1234_5678).decode(geometry);
    /// assert_eq!(decoded.index, 0x7);
    /// assert_eq!(decoded.tag, 0x12_3456);
    /// ```
    #[inline]
    pub fn decode(self, geometry: Geometry) -> DecodedAddr {
        let block_addr = self.0.checked_shr(geometry.offset_bits).unwrap_or(0);
        let index_mask = 1u32
            .checked_shl(geometry.index_bits)
            .map_or(u32::MAX, |bit| bit - 1);
        DecodedAddr {
            tag: block_addr.checked_shr(geometry.index_bits).unwrap_or(0),
            index: block_addr & index_mask,
        }
    }
}

impl From<u32> for Address {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl Geometry {
    /// Derives the partition widths from the set count and block size.
    ///
    /// Both arguments are expected to be powers of two; `log2` is taken as the
    /// number of trailing zero bits. The tag width saturates at zero.
    pub const fn new(num_sets: u32, block_size: u32) -> Self {
        let offset_bits = block_size.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        Self {
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_BITS.saturating_sub(offset_bits + index_bits),
        }
    }
}
