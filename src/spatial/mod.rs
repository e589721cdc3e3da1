//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Grid state storage and neighbor lookup
//! - Tile shapes, directions and edge connections

/// Grid state storage and neighbor lookup
pub mod grid;
/// Tile shapes, directions and connection geometry
pub mod tiles;

pub use grid::GridState;
pub use tiles::{Direction, TileShape};
