//! Wave function collapse over a grid of pipe tiles, followed by a territory contest
//!
//! Six pipe shapes are placed so that neighboring pipes connect, guided by a
//! fixed adjacency rule table, weighted random selection and Shannon entropy.
//! Once the grid is filled, a color token per cell competes with its neighbors
//! for ownership until a pass changes nothing.

#![forbid(unsafe_code)]

/// Core algorithm: domains, rules, propagation, selection, contest and drivers
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Probability and entropy helpers
pub mod math;
/// Grid storage and tile geometry
pub mod spatial;

pub use algorithm::executor::{SolverConfig, WfcGrid};
pub use io::error::{Result, SolverError};
