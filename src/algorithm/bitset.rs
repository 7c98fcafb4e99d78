use bitvec::prelude::*;
use std::fmt;

/// Fixed-capacity bitset over tile ids
///
/// Bits are packed into machine words, so every whole-set operation is
/// O(capacity / word size). Tile ids are 0-based indices into the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing every tile id below `max_tiles`
    pub fn full(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Bytes of word storage needed for a bitset of the given capacity
    pub const fn storage_bytes(max_tiles: usize) -> usize {
        max_tiles.div_ceil(usize::BITS as usize) * size_of::<usize>()
    }

    /// Capacity fixed at construction
    pub const fn len(&self) -> usize {
        self.max_tiles
    }

    /// Test tile membership
    ///
    /// Ids outside the capacity are never members.
    pub fn get(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Turn a single tile on or off
    pub fn set(&mut self, tile: usize, on: bool) {
        debug_assert!(
            tile < self.max_tiles,
            "tile {tile} out of range for bitset of {}",
            self.max_tiles
        );
        if tile < self.max_tiles {
            self.bits.set(tile, on);
        }
    }

    /// Set every tile uniformly
    pub fn reset(&mut self, on: bool) {
        self.bits.fill(on);
    }

    /// Keep only the tiles also present in `other`
    pub fn intersect_with(&mut self, other: &Self) {
        debug_assert_eq!(self.max_tiles, other.max_tiles, "bitset capacity mismatch");
        self.bits &= &other.bits;
    }

    /// Add every tile present in `other`
    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.max_tiles, other.max_tiles, "bitset capacity mismatch");
        self.bits |= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if exactly one tile is present
    pub fn is_single(&self) -> bool {
        self.count() == 1
    }

    /// Lowest tile id present, or the capacity when the set is empty
    pub fn first_set(&self) -> usize {
        self.bits.first_one().unwrap_or(self.max_tiles)
    }

    /// Iterate present tile ids in ascending order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all present tile ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
