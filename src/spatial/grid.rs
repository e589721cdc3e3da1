//! Grid state holding per-cell domains and token ownership
//!
//! Both arrays are indexed `[x, y]` with x the column and y the row, y growing
//! downward. Coordinates outside the grid are a caller bug and panic.

use ndarray::Array2;

use crate::algorithm::contest::TokenId;
use crate::algorithm::domain::TileSet;
use crate::spatial::tiles::{Direction, TileShape};

/// Per-cell solver state
#[derive(Debug, Clone)]
pub struct GridState {
    /// Remaining candidates for every cell
    pub domains: Array2<TileSet>,

    /// Token currently owning every cell
    pub token_ids: Array2<TokenId>,

    /// Grid dimensions (width, height)
    pub dimensions: (usize, usize),
}

impl GridState {
    /// Create a grid where every domain holds all six shapes
    ///
    /// `token_for` is called once per cell, x outer and y inner, to assign the
    /// initial owner.
    pub fn new(
        width: usize,
        height: usize,
        mut token_for: impl FnMut(usize, usize) -> TokenId,
    ) -> Self {
        Self {
            domains: Array2::from_elem((width, height), TileSet::full()),
            token_ids: Array2::from_shape_fn((width, height), |(x, y)| token_for(x, y)),
            dimensions: (width, height),
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.dimensions.0
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.dimensions.1
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.dimensions.0 * self.dimensions.1
    }

    /// Whether a coordinate lies inside the grid
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.dimensions.0 && y < self.dimensions.1
    }

    /// Domain of a cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn domain(&self, x: usize, y: usize) -> TileSet {
        self.assert_in_bounds(x, y);
        self.domains
            .get([x, y])
            .copied()
            .unwrap_or_else(TileSet::empty)
    }

    /// Replace the domain of a cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn set_domain(&mut self, x: usize, y: usize, domain: TileSet) {
        self.assert_in_bounds(x, y);
        if let Some(cell) = self.domains.get_mut([x, y]) {
            *cell = domain;
        }
    }

    /// The resolved shape of a collapsed cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn collapsed_tile(&self, x: usize, y: usize) -> Option<TileShape> {
        self.domain(x, y).collapsed_tile()
    }

    /// Token owning a cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn token_id(&self, x: usize, y: usize) -> TokenId {
        self.assert_in_bounds(x, y);
        self.token_ids.get([x, y]).copied().unwrap_or_default()
    }

    /// Reassign the owner of a cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn set_token_id(&mut self, x: usize, y: usize, token: TokenId) {
        self.assert_in_bounds(x, y);
        if let Some(cell) = self.token_ids.get_mut([x, y]) {
            *cell = token;
        }
    }

    /// Coordinate of the neighbor in `direction`, if it exists
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        self.contains(nx, ny).then_some((nx, ny))
    }

    /// Collapsed neighbors in left, right, above, below order
    ///
    /// Undecided, contradicted and out-of-bounds neighbors are skipped.
    pub fn collapsed_neighbors(&self, x: usize, y: usize) -> Vec<(Direction, TileShape)> {
        Direction::NEIGHBOR_ORDER
            .into_iter()
            .filter_map(|direction| {
                let (nx, ny) = self.neighbor(x, y, direction)?;
                self.collapsed_tile(nx, ny).map(|tile| (direction, tile))
            })
            .collect()
    }

    /// All coordinates, x outer and y inner
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (width, height) = self.dimensions;
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Number of cells whose domain satisfies the predicate
    pub fn count_domains(&self, predicate: impl Fn(&TileSet) -> bool) -> usize {
        self.domains.iter().filter(|domain| predicate(domain)).count()
    }

    fn assert_in_bounds(&self, x: usize, y: usize) {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) is outside the {}x{} grid",
            self.dimensions.0,
            self.dimensions.1
        );
    }
}
