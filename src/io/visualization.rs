//! Frame capture and GIF generation for the territory contest

use crate::algorithm::contest::ColorToken;
use crate::algorithm::executor::WfcGrid;
use crate::io::configuration::FINAL_FRAME_HOLD;
use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::io::image::{render_state, rendered_size};
use crate::spatial::GridState;
use image::{Delay, Frame, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

const UNOWNED: [u8; 4] = [255, 255, 255, 255];

/// State of the grid after one contest pass
#[derive(Debug, Clone)]
struct PassSnapshot {
    grid_state: GridState,
    // Display value of each cell's owner at the time of the pass
    colors: Array2<[u8; 4]>,
}

/// Captures the grid while the contest runs
///
/// Each pass keeps only domains and owner colors; images are rendered one at a
/// time while the GIF is encoded. Pipes are drawn in territory colors so
/// ownership changes are visible.
#[derive(Debug, Default)]
pub struct ContestCapture {
    passes: Vec<PassSnapshot>,
    validity_overlay: bool,
}

impl ContestCapture {
    /// Create a capture that renders with the given overlay setting
    pub fn new(validity_overlay: bool) -> Self {
        Self {
            passes: Vec::new(),
            validity_overlay,
        }
    }

    /// Store the grid's current state
    pub fn record(&mut self, grid: &WfcGrid) {
        let colors = Array2::from_shape_fn(grid.grid_state.domains.dim(), |(x, y)| {
            grid.token_at(x, y).map_or(UNOWNED, ColorToken::value)
        });
        self.passes.push(PassSnapshot {
            grid_state: grid.grid_state.clone(),
            colors,
        });
    }

    /// Frames recorded so far
    pub fn frame_count(&self) -> usize {
        self.passes.len()
    }

    fn render(&self, pass: &PassSnapshot) -> RgbaImage {
        render_state(&pass.grid_state, self.validity_overlay, |x, y| {
            Rgba(pass.colors.get([x, y]).copied().unwrap_or(UNOWNED))
        })
    }

    /// Encode the recorded passes as an animated GIF
    ///
    /// The last frame is shown `FINAL_FRAME_HOLD` times longer than the others.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were recorded
    /// - The frames would exceed the image size limit
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let Some(last) = self.passes.last() else {
            return Err(invalid_parameter(
                "visualization",
                &output_path.display(),
                &"no contest frames were captured",
            ));
        };
        rendered_size(last.grid_state.width(), last.grid_state.height())?;

        let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
        let hold = Delay::from_numer_denom_ms(frame_delay_ms.saturating_mul(FINAL_FRAME_HOLD), 1);
        let frames = self
            .passes
            .iter()
            .map(|pass| (pass, delay))
            .chain(std::iter::once((last, hold)))
            .map(|(pass, delay)| Frame::from_parts(self.render(pass), 0, 0, delay));

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| SolverError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SolverError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(
            path = %output_path.display(),
            frames = self.frame_count(),
            "contest animation written"
        );
        Ok(())
    }
}
