//! Mathematical utilities for the solver

/// Probability normalization and entropy
pub mod probability;
