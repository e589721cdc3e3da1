use crate::spatial::tiles::{TILE_COUNT, TileShape};
use bitvec::prelude::*;
use std::fmt;

type DomainBits = BitArray<[u8; 1], Lsb0>;

/// Candidate tile shapes still possible for one cell
///
/// Bit `i` stands for `TileShape::ALL[i]`, so iteration always yields survivors in
/// canonical order. Size 0 is a contradiction, size 1 a collapsed cell.
#[derive(Clone, Copy)]
pub struct TileSet {
    bits: DomainBits,
}

impl TileSet {
    /// A set with no candidates (contradiction)
    pub const fn empty() -> Self {
        Self {
            bits: DomainBits::ZERO,
        }
    }

    /// A set holding every shape
    pub fn full() -> Self {
        TileShape::ALL.into_iter().collect()
    }

    /// A set holding exactly one shape
    pub fn single(tile: TileShape) -> Self {
        let mut set = Self::empty();
        set.insert(tile);
        set
    }

    /// Add a shape
    pub fn insert(&mut self, tile: TileShape) {
        self.bits.set(tile.index(), true);
    }

    /// Test shape membership
    pub fn contains(&self, tile: TileShape) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// True for a contradiction
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// True when exactly one candidate remains
    pub fn is_collapsed(&self) -> bool {
        self.len() == 1
    }

    /// True when nothing has been excluded yet
    pub fn is_unconstrained(&self) -> bool {
        self.len() == TILE_COUNT
    }

    /// The sole candidate of a collapsed cell
    pub fn collapsed_tile(&self) -> Option<TileShape> {
        if self.is_collapsed() { self.first() } else { None }
    }

    /// First candidate in canonical order
    pub fn first(&self) -> Option<TileShape> {
        self.iter().next()
    }

    /// Keep only candidates satisfying the predicate, preserving order
    #[must_use]
    pub fn filter(&self, mut keep: impl FnMut(TileShape) -> bool) -> Self {
        self.iter().filter(|&tile| keep(tile)).collect()
    }

    /// Candidates in canonical order
    pub fn iter(&self) -> impl Iterator<Item = TileShape> + '_ {
        self.bits.iter_ones().filter_map(TileShape::from_index)
    }

    /// Candidates as an owned vector
    pub fn to_vec(&self) -> Vec<TileShape> {
        self.iter().collect()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::full()
    }
}

impl PartialEq for TileSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for TileSet {}

impl FromIterator<TileShape> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileShape>>(iter: I) -> Self {
        let mut set = Self::empty();
        for tile in iter {
            set.insert(tile);
        }
        set
    }
}

impl From<&[TileShape]> for TileSet {
    fn from(tiles: &[TileShape]) -> Self {
        tiles.iter().copied().collect()
    }
}

impl fmt::Debug for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileSet({} tiles: ", self.len())?;
        for tile in self.iter() {
            write!(f, "{tile}")?;
        }
        write!(f, ")")
    }
}
