//! Authored adjacency rules between pipe pieces
//!
//! One allow-list per (candidate, direction) pair naming the shapes that may sit
//! next to the candidate on that side. The lists are hand-written and kept exactly
//! as authored; they are not derived from `TileShape::connections`.

use crate::spatial::tiles::{Direction, TILE_COUNT, TileShape};

const H: TileShape = TileShape::Horizontal;
const V: TileShape = TileShape::Vertical;
const BL: TileShape = TileShape::BottomLeftCorner;
const TL: TileShape = TileShape::TopLeftCorner;
const BR: TileShape = TileShape::BottomRightCorner;
const TR: TileShape = TileShape::TopRightCorner;

/// Allow-lists indexed by `[candidate.index()][direction.index()]`
///
/// Direction order is above, below, left, right.
static ADJACENCY_RULES: [[[TileShape; 3]; 4]; TILE_COUNT] = [
    // ─
    [[H, BL, BR], [H, TL, TR], [H, BL, TL], [H, BR, TR]],
    // │
    [[V, TL, TR], [V, BL, BR], [V, BR, TR], [V, BL, TL]],
    // ┗
    [[V, TL, TR], [H, TL, TR], [V, BR, TR], [H, BR, TR]],
    // ┏
    [[H, BL, BR], [V, BL, BR], [V, TR, BR], [H, TR, BR]],
    // ┛
    [[V, TR, TL], [H, TL, TR], [H, BL, TL], [V, BL, TL]],
    // ┓
    [[H, BL, BR], [V, BR, BL], [H, TL, BL], [V, BL, TL]],
];

/// Shapes allowed next to `candidate` on its `direction` side, in authored order
pub fn allowed(candidate: TileShape, direction: Direction) -> &'static [TileShape] {
    match ADJACENCY_RULES
        .get(candidate.index())
        .and_then(|per_direction| per_direction.get(direction.index()))
    {
        Some(list) => list,
        None => &[],
    }
}

/// Whether `candidate` may be placed where `neighbor` already sits in `direction`
pub fn solve(candidate: TileShape, neighbor: TileShape, direction: Direction) -> bool {
    allowed(candidate, direction).contains(&neighbor)
}
