use crate::algorithm::domain::TileSet;
use crate::io::configuration::DEFAULT_TILE_WEIGHT;
use crate::io::error::{Result, invalid_parameter};
use crate::math::probability::weighted_entropy;
use crate::spatial::GridState;
use crate::spatial::tiles::{TILE_COUNT, TileShape};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::str::FromStr;

/// Entropy reported for a cell nothing has constrained yet
///
/// Larger than any weighted entropy of six or fewer outcomes, so partially
/// constrained cells are always preferred over untouched ones.
pub const UNCONSTRAINED_ENTROPY: f64 = 100.0;

/// Relative likelihood of each tile shape
///
/// Shared by every cell of a grid and editable at any time; changes affect the
/// next collapse and entropy query.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: [f64; TILE_COUNT],
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::uniform(DEFAULT_TILE_WEIGHT)
    }
}

impl WeightTable {
    /// Every shape gets the same weight
    pub const fn uniform(weight: f64) -> Self {
        Self {
            weights: [weight; TILE_COUNT],
        }
    }

    /// Weight of a shape
    pub fn get(&self, tile: TileShape) -> f64 {
        self.weights
            .get(tile.index())
            .copied()
            .unwrap_or(DEFAULT_TILE_WEIGHT)
    }

    /// Change the weight of a shape
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is not a positive finite number
    pub fn set(&mut self, tile: TileShape, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(invalid_parameter(
                "weight",
                &format!("{}={weight}", tile.name()),
                &"tile weights must be positive and finite",
            ));
        }
        if let Some(slot) = self.weights.get_mut(tile.index()) {
            *slot = weight;
        }
        Ok(())
    }

    /// Apply a parsed override
    ///
    /// # Errors
    ///
    /// Returns an error if the override's weight is not a positive finite number
    pub fn apply(&mut self, weight_override: WeightOverride) -> Result<()> {
        self.set(weight_override.tile, weight_override.weight)
    }

    /// Weights of the given shapes, in the same order
    pub fn weights_for(&self, tiles: &[TileShape]) -> Vec<f64> {
        tiles.iter().map(|&tile| self.get(tile)).collect()
    }

    /// Weighted Shannon entropy of a domain
    ///
    /// An untouched domain reports [`UNCONSTRAINED_ENTROPY`].
    pub fn entropy(&self, domain: &TileSet) -> f64 {
        if domain.is_unconstrained() {
            return UNCONSTRAINED_ENTROPY;
        }
        weighted_entropy(&self.weights_for(&domain.to_vec()))
    }
}

/// A `shape=weight` pair given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightOverride {
    /// Shape whose weight changes
    pub tile: TileShape,
    /// New weight
    pub weight: f64,
}

impl FromStr for WeightOverride {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected SHAPE=WEIGHT, got '{s}'"))?;
        let tile = name.parse::<TileShape>().map_err(|e| e.to_string())?;
        let weight = value
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid weight '{value}': {e}"))?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(format!("weight for {} must be positive", tile.name()));
        }
        Ok(Self { tile, weight })
    }
}

/// Seeded random source for every stochastic choice the solver makes
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a selector seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Uniform draw from `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform index into a collection of `len` items
    ///
    /// Returns 0 for an empty collection.
    pub fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    /// Fair coin flip
    pub fn coin_flip(&mut self) -> bool {
        self.unit() > 0.5
    }

    /// Weighted random index, see [`weighted_index`]
    ///
    /// Draws the target uniformly from `[0, Σweights)`. Returns `None` for empty
    /// weights without drawing.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }
        let total: f64 = weights.iter().sum();
        weighted_index(weights, self.unit() * total)
    }

    /// Pick one item with probability proportional to its weight
    ///
    /// Returns `None` when `items` is empty or the lengths disagree.
    pub fn pick<'a, T>(&mut self, items: &'a [T], weights: &[f64]) -> Option<&'a T> {
        if items.len() != weights.len() {
            return None;
        }
        self.weighted_choice(weights)
            .and_then(|index| items.get(index))
    }
}

/// Index selected by `target` using a strict cumulative boundary
///
/// Walks the running sum from `weights[0]`, advancing while `target` is strictly
/// greater. An item therefore owns the upper boundary of its interval, and a
/// target past the total lands on the last item.
pub fn weighted_index(weights: &[f64], target: f64) -> Option<usize> {
    let mut running = *weights.first()?;
    let mut index = 0;
    while target > running {
        match weights.get(index + 1) {
            Some(&weight) => {
                index += 1;
                running += weight;
            }
            None => break,
        }
    }
    Some(index)
}

/// Undecided cells tied for the lowest entropy, x outer and y inner
///
/// Ties use exact float equality. Collapsed and contradicted cells are never
/// candidates.
pub fn lowest_entropy_cells(grid_state: &GridState, weights: &WeightTable) -> Vec<(usize, usize)> {
    let mut lowest = f64::INFINITY;
    let mut found = Vec::new();

    for (x, y) in grid_state.cells() {
        let domain = grid_state.domain(x, y);
        if domain.len() <= 1 {
            continue;
        }
        let entropy = weights.entropy(&domain);
        #[allow(clippy::float_cmp)]
        let tied = entropy == lowest;
        if entropy < lowest {
            lowest = entropy;
            found.clear();
            found.push((x, y));
        } else if tied {
            found.push((x, y));
        }
    }

    found
}
