use crate::algorithm::domain::TileSet;
use crate::algorithm::rules::solve;
use crate::spatial::GridState;
use crate::spatial::tiles::{Direction, TileShape};
use bitvec::prelude::*;

/// Recompute a cell's domain from scratch
///
/// Starts from all six shapes and keeps those every collapsed neighbor accepts.
/// Candidates excluded earlier come back if the neighbor that excluded them is
/// no longer collapsed.
pub fn compute_reset_domain(grid_state: &GridState, x: usize, y: usize) -> TileSet {
    let neighbors = grid_state.collapsed_neighbors(x, y);
    TileSet::full().filter(|candidate| {
        neighbors
            .iter()
            .all(|&(direction, neighbor)| solve(candidate, neighbor, direction))
    })
}

/// Rule checks of `tile` placed at `(x, y)` against each collapsed neighbor
///
/// One entry per collapsed neighbor in left, right, above, below order.
pub fn validity_checks(grid_state: &GridState, x: usize, y: usize, tile: TileShape) -> Vec<bool> {
    grid_state
        .collapsed_neighbors(x, y)
        .into_iter()
        .map(|(direction, neighbor)| solve(tile, neighbor, direction))
        .collect()
}

/// Rule checks of the cell's own tile, its first candidate
///
/// A contradicted cell has no tile and yields no checks.
pub fn cell_validity(grid_state: &GridState, x: usize, y: usize) -> Vec<bool> {
    grid_state
        .domain(x, y)
        .first()
        .map(|tile| validity_checks(grid_state, x, y, tile))
        .unwrap_or_default()
}

/// Whether placing `tile` at `(x, y)` would break a rule with a collapsed neighbor
///
/// Evaluated without touching the grid; undecided neighbors are not consulted.
pub fn would_invalidate(grid_state: &GridState, x: usize, y: usize, tile: TileShape) -> bool {
    validity_checks(grid_state, x, y, tile)
        .into_iter()
        .any(|valid| !valid)
}

/// Counters from one propagation flood fill
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    /// Cells entered by the fill
    pub visited: usize,
    /// Undecided cells whose domain was recomputed
    pub recomputed: usize,
    /// Cells whose recomputed domain came out empty
    pub contradictions: Vec<(usize, usize)>,
}

/// A cell on the fill stack and the next neighbor it will look at
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: usize,
    y: usize,
    next: usize,
}

/// Spread a changed cell's constraints across the grid
///
/// Depth-first fill over the 4-neighborhood. Each entered cell with more than
/// one candidate is recomputed; cells that come out fully unconstrained stop the
/// fill on that branch. Neighbors are examined left, right, above, below, each
/// sub-fill finishing before the next neighbor is looked at. An explicit stack
/// replaces call recursion so fill depth is bounded only by the grid size.
pub fn propagate_tile_change(grid_state: &mut GridState, x: usize, y: usize) -> PropagationSummary {
    let width = grid_state.width();
    let mut visited = bitvec![0; grid_state.cell_count()];
    let mut stack = Vec::new();
    let mut summary = PropagationSummary::default();

    enter_cell(grid_state, &mut visited, &mut stack, &mut summary, (x, y), width);

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = Direction::NEIGHBOR_ORDER.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let (fx, fy) = (frame.x, frame.y);

        if let Some(cell) = grid_state.neighbor(fx, fy, direction) {
            let already = visited
                .get(cell.1 * width + cell.0)
                .as_deref()
                .copied()
                .unwrap_or(true);
            if !already {
                enter_cell(grid_state, &mut visited, &mut stack, &mut summary, cell, width);
            }
        }
    }

    tracing::debug!(
        origin_x = x,
        origin_y = y,
        visited = summary.visited,
        recomputed = summary.recomputed,
        contradictions = summary.contradictions.len(),
        "propagation finished"
    );

    summary
}

fn enter_cell(
    grid_state: &mut GridState,
    visited: &mut BitVec,
    stack: &mut Vec<Frame>,
    summary: &mut PropagationSummary,
    (x, y): (usize, usize),
    width: usize,
) {
    visited.set(y * width + x, true);
    summary.visited += 1;

    let mut domain = grid_state.domain(x, y);
    if domain.len() > 1 {
        domain = compute_reset_domain(grid_state, x, y);
        grid_state.set_domain(x, y, domain);
        summary.recomputed += 1;
        if domain.is_empty() {
            summary.contradictions.push((x, y));
        }
    }

    if !domain.is_unconstrained() {
        stack.push(Frame { x, y, next: 0 });
    }
}
