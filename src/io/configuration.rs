//! Solver constants and runtime configuration defaults

// Grid defaults
/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 30;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 30;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 2_000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Weight every tile shape starts with
pub const DEFAULT_TILE_WEIGHT: f64 = 1.0;

// Batch solving
/// Side length of a batch region before overlap
pub const BATCH_SIZE: usize = 5;
/// Retries of a failing batch before it is accepted with contradictions
pub const MAX_BATCH_RETRIES: usize = 100;

// Territory contest
/// Upper bound on contest passes run by the command line driver
pub const DEFAULT_CONTEST_STEPS: usize = 500;

// Rendering
/// Pixel size of one grid cell
pub const CELL_SIZE_PX: u32 = 30;
/// Pixel width of a pipe stroke
pub const LINE_WIDTH_PX: u32 = 10;
/// Largest rendered image side in pixels
pub const MAX_IMAGE_DIMENSION_PX: u32 = 8_192;
/// Default output image path
pub const DEFAULT_OUTPUT: &str = "pipes.png";
/// Suffix for the contest animation written next to the output image
pub const VISUALIZATION_SUFFIX: &str = "_contest.gif";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// Multiplier applied to the delay of the last frame
pub const FINAL_FRAME_HOLD: u32 = 25;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
