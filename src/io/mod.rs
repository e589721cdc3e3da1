/// Command-line arguments and the run orchestration
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Grid rendering and PNG export
pub mod image;
/// Terminal progress bars
pub mod progress;
/// Contest frame capture and GIF export
pub mod visualization;
