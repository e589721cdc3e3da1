use crate::{
    algorithm::contest::{ColorToken, ContestOutcome, TokenId, TokenStore, simulate_color_step},
    algorithm::domain::TileSet,
    algorithm::propagation::{
        PropagationSummary, cell_validity, compute_reset_domain, propagate_tile_change,
        would_invalidate,
    },
    algorithm::selection::{RandomSelector, WeightTable, lowest_entropy_cells},
    io::configuration::{DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH, MAX_GRID_DIMENSION},
    io::error::{Result, SolverError, invalid_parameter},
    spatial::GridState,
    spatial::tiles::TileShape,
};

/// Construction parameters for a [`WfcGrid`]
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Seed for every random draw; `None` seeds from the operating system
    pub seed: Option<u64>,
    /// Initial tile weights
    pub weights: WeightTable,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: Some(DEFAULT_SEED),
            weights: WeightTable::default(),
        }
    }
}

impl SolverConfig {
    /// Check dimensions before any allocation happens
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// Wave function collapse grid of pipe tiles with a territory contest
///
/// Owns the per-cell domains, the color tokens, the weight table and the random
/// source. Every mutating call runs to completion before returning.
#[derive(Debug, Clone)]
pub struct WfcGrid {
    /// Domains and token ownership per cell
    pub grid_state: GridState,
    /// Every token created for this grid
    pub tokens: TokenStore,
    /// Tile weights used for selection and entropy
    pub weights: WeightTable,
    /// Random source for picks, tie-breaks and contest coin flips
    pub random_selector: RandomSelector,
}

impl WfcGrid {
    /// Create a grid seeded from the operating system
    ///
    /// Every domain starts with all six shapes and every cell gets its own random
    /// token.
    pub fn new(width: usize, height: usize) -> Self {
        Self::build(width, height, WeightTable::default(), RandomSelector::from_os_rng())
    }

    /// Create a reproducible grid
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        Self::build(width, height, WeightTable::default(), RandomSelector::new(seed))
    }

    /// Create a grid from validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured dimensions are invalid
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        config.validate()?;
        let random_selector = config
            .seed
            .map_or_else(RandomSelector::from_os_rng, RandomSelector::new);
        Ok(Self::build(
            config.width,
            config.height,
            config.weights.clone(),
            random_selector,
        ))
    }

    fn build(
        width: usize,
        height: usize,
        weights: WeightTable,
        mut random_selector: RandomSelector,
    ) -> Self {
        let mut tokens = TokenStore::new();
        let grid_state = GridState::new(width, height, |_, _| {
            tokens.insert(ColorToken::random(&mut random_selector))
        });

        Self {
            grid_state,
            tokens,
            weights,
            random_selector,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.grid_state.width()
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.grid_state.height()
    }

    /// Resolve a cell to one shape chosen by weight among the shapes its
    /// collapsed neighbors accept, then propagate
    ///
    /// If no candidate survives the cell becomes a contradiction and stays one.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn collapse(&mut self, x: usize, y: usize) {
        let survivors = self
            .grid_state
            .domain(x, y)
            .filter(|tile| !self.will_produce_invalid_state(x, y, tile))
            .to_vec();

        let weights = self.weights.weights_for(&survivors);
        let Some(&tile) = self.random_selector.pick(&survivors, &weights) else {
            tracing::debug!(x, y, "collapse found no valid tile, cell contradicted");
            self.grid_state.set_domain(x, y, TileSet::empty());
            return;
        };

        self.deterministic_collapse(x, y, tile, true);
    }

    /// Force a cell to `tile`, optionally propagating the change
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn deterministic_collapse(
        &mut self,
        x: usize,
        y: usize,
        tile: TileShape,
        propagate: bool,
    ) -> Option<PropagationSummary> {
        self.grid_state.set_domain(x, y, TileSet::single(tile));
        propagate.then(|| propagate_tile_change(&mut self.grid_state, x, y))
    }

    /// Recompute a cell's domain from all six shapes and its collapsed neighbors
    ///
    /// Applies to any cell, including collapsed and contradicted ones.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn reset_tile(&mut self, x: usize, y: usize) {
        let domain = compute_reset_domain(&self.grid_state, x, y);
        self.grid_state.set_domain(x, y, domain);
    }

    /// Current candidates of a cell in survivor order
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn get_tile(&self, x: usize, y: usize) -> TileSet {
        self.grid_state.domain(x, y)
    }

    /// Rule checks of the cell's tile against each collapsed neighbor
    ///
    /// The cell's tile is its first candidate. A contradicted cell has no tile and
    /// yields no checks.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn tile_is_valid(&self, x: usize, y: usize) -> Vec<bool> {
        cell_validity(&self.grid_state, x, y)
    }

    /// Whether committing `tile` at `(x, y)` would break a rule with a
    /// collapsed neighbor
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn will_produce_invalid_state(&self, x: usize, y: usize, tile: TileShape) -> bool {
        would_invalidate(&self.grid_state, x, y, tile)
    }

    /// Weighted entropy of a cell's domain
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn get_entropy(&self, x: usize, y: usize) -> f64 {
        self.weights.entropy(&self.grid_state.domain(x, y))
    }

    /// An undecided cell with the lowest entropy, ties broken uniformly at random
    ///
    /// # Errors
    ///
    /// Returns `NoUndecidedCells` when every cell is collapsed or contradicted
    pub fn find_lowest_entropy(&mut self) -> Result<(usize, usize)> {
        let candidates = lowest_entropy_cells(&self.grid_state, &self.weights);
        let index = self.random_selector.choose_index(candidates.len());
        candidates
            .get(index)
            .copied()
            .ok_or(SolverError::NoUndecidedCells {
                grid_dimensions: self.grid_state.dimensions,
            })
    }

    /// Run one pass of the territory contest
    ///
    /// Returns whether any cell changed owner. Once a pass changes nothing, later
    /// passes change nothing either.
    pub fn simulate_color_step(&mut self) -> bool {
        self.contest_pass().changed()
    }

    /// Run one pass of the territory contest and report its battles
    pub fn contest_pass(&mut self) -> ContestOutcome {
        simulate_color_step(
            &mut self.grid_state,
            &mut self.tokens,
            &mut self.random_selector,
        )
    }

    /// Tile weights
    pub const fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Tile weights, editable between calls
    pub const fn weights_mut(&mut self) -> &mut WeightTable {
        &mut self.weights
    }

    /// Change one tile weight
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is not a positive finite number
    pub fn set_weight(&mut self, tile: TileShape, weight: f64) -> Result<()> {
        self.weights.set(tile, weight)
    }

    /// Every token created for this grid
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Handle of the token owning a cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn token_id_at(&self, x: usize, y: usize) -> TokenId {
        self.grid_state.token_id(x, y)
    }

    /// Token owning a cell
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid
    pub fn token_at(&self, x: usize, y: usize) -> Option<&ColorToken> {
        self.tokens.get(self.token_id_at(x, y))
    }

    /// Cells resolved to exactly one shape
    pub fn collapsed_count(&self) -> usize {
        self.grid_state.count_domains(TileSet::is_collapsed)
    }

    /// Cells left without any candidate
    pub fn contradiction_count(&self) -> usize {
        self.grid_state.count_domains(TileSet::is_empty)
    }

    /// True once no cell has two or more candidates
    pub fn is_fully_resolved(&self) -> bool {
        self.grid_state.count_domains(|domain| domain.len() > 1) == 0
    }
}
