/// Color tokens and the territory contest
pub mod contest;
/// Candidate sets for grid cells
pub mod domain;
/// Stepping, batch and contest driving loops
pub mod driver;
/// Grid orchestrator exposing collapse, propagation and contest operations
pub mod executor;
/// Constraint propagation and speculative validity checks
pub mod propagation;
/// Authored adjacency rule table
pub mod rules;
/// Tile weights, weighted selection and entropy-guided cell choice
pub mod selection;
