//! Raster rendering of pipe grids and PNG export

use crate::algorithm::executor::WfcGrid;
use crate::algorithm::propagation::cell_validity;
use crate::io::configuration::{CELL_SIZE_PX, LINE_WIDTH_PX, MAX_IMAGE_DIMENSION_PX};
use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::spatial::GridState;
use crate::spatial::tiles::{Direction, TILE_COUNT};
use image::{Rgba, RgbaImage};
use std::path::Path;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PIPE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CONTRADICTION: Rgba<u8> = Rgba([255, 0, 0, 255]);
const OVERLAY: [u8; 3] = [0, 255, 0];
const OVERLAY_ALPHA: f64 = 0.3;

/// What the renderer draws on top of the pipes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Color each pipe with the display value of the token owning its cell
    pub territory: bool,
    /// Tint cells whose tile agrees with every collapsed neighbor
    pub validity_overlay: bool,
}

/// Render every cell of the grid
///
/// Contradictions are solid red, collapsed cells show their pipe on black and
/// undecided cells are gray, darker the more candidates they keep.
pub fn render_grid(grid: &WfcGrid, options: &RenderOptions) -> RgbaImage {
    render_state(&grid.grid_state, options.validity_overlay, |x, y| {
        if options.territory {
            grid.token_at(x, y).map_or(PIPE, |token| Rgba(token.value()))
        } else {
            PIPE
        }
    })
}

/// Render cell domains with pipes drawn in the color `pipe_color` gives each cell
///
/// The overlay tints every cell whose tile agrees with all collapsed
/// neighbors, including cells that have none.
pub fn render_state(
    grid_state: &GridState,
    validity_overlay: bool,
    pipe_color: impl Fn(usize, usize) -> Rgba<u8>,
) -> RgbaImage {
    let width = grid_state.width() as u32 * CELL_SIZE_PX;
    let height = grid_state.height() as u32 * CELL_SIZE_PX;
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    for (x, y) in grid_state.cells() {
        let origin = (x as u32 * CELL_SIZE_PX, y as u32 * CELL_SIZE_PX);
        let domain = grid_state.domain(x, y);

        if domain.is_empty() {
            fill_rect(&mut img, origin, (0, 0, CELL_SIZE_PX, CELL_SIZE_PX), CONTRADICTION);
        } else if let Some(tile) = domain.collapsed_tile() {
            let color = pipe_color(x, y);
            for direction in tile.connections() {
                fill_rect(&mut img, origin, stroke_bounds(direction), color);
            }
        } else {
            fill_rect(
                &mut img,
                origin,
                (0, 0, CELL_SIZE_PX, CELL_SIZE_PX),
                undecided_shade(domain.len()),
            );
        }

        if validity_overlay && cell_validity(grid_state, x, y).iter().all(|&valid| valid) {
            tint_cell(&mut img, origin);
        }
    }

    img
}

/// Pixel size of the image rendered for a `width` by `height` grid
///
/// # Errors
///
/// Returns an error if either side would exceed `MAX_IMAGE_DIMENSION_PX`
pub fn rendered_size(width: usize, height: usize) -> Result<(u32, u32)> {
    let max_cells = (MAX_IMAGE_DIMENSION_PX / CELL_SIZE_PX) as usize;
    for (parameter, cells) in [("width", width), ("height", height)] {
        if cells > max_cells {
            return Err(invalid_parameter(
                parameter,
                &cells,
                &format!(
                    "renders larger than {MAX_IMAGE_DIMENSION_PX} px; at most {max_cells} cells"
                ),
            ));
        }
    }
    Ok((width as u32 * CELL_SIZE_PX, height as u32 * CELL_SIZE_PX))
}

/// Gray level for an undecided cell with `size` candidates
pub fn undecided_shade(size: usize) -> Rgba<u8> {
    let level = (255.0 * (1.0 - size as f64 / TILE_COUNT as f64)).round() as u8;
    Rgba([level, level, level, 255])
}

/// Pixel bounds `(x0, y0, x1, y1)` of the stroke from the cell center to one edge
pub const fn stroke_bounds(direction: Direction) -> (u32, u32, u32, u32) {
    let center = CELL_SIZE_PX / 2;
    let half = LINE_WIDTH_PX / 2;
    let (near, far) = (center - half, center + half);
    match direction {
        Direction::Left => (0, near, far, far),
        Direction::Right => (near, near, CELL_SIZE_PX, far),
        Direction::Above => (near, 0, far, far),
        Direction::Below => (near, near, far, CELL_SIZE_PX),
    }
}

fn fill_rect(
    img: &mut RgbaImage,
    (ox, oy): (u32, u32),
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    color: Rgba<u8>,
) {
    for py in y0..y1 {
        for px in x0..x1 {
            if let Some(pixel) = img.get_pixel_mut_checked(ox + px, oy + py) {
                *pixel = color;
            }
        }
    }
}

fn tint_cell(img: &mut RgbaImage, (ox, oy): (u32, u32)) {
    for py in 0..CELL_SIZE_PX {
        for px in 0..CELL_SIZE_PX {
            if let Some(pixel) = img.get_pixel_mut_checked(ox + px, oy + py) {
                for (channel, &target) in pixel.0.iter_mut().zip(OVERLAY.iter()) {
                    let blended =
                        f64::from(*channel) * (1.0 - OVERLAY_ALPHA) + f64::from(target) * OVERLAY_ALPHA;
                    *channel = blended.round() as u8;
                }
            }
        }
    }
}

/// Write an image as PNG, creating the parent directory first
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded and saved
pub fn save_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| SolverError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Render the grid and save it as a PNG image
///
/// # Errors
///
/// Returns an error if the image would be too large, the parent directory
/// cannot be created or the image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &WfcGrid, options: &RenderOptions, output_path: &Path) -> Result<()> {
    rendered_size(grid.width(), grid.height())?;
    save_png(&render_grid(grid, options), output_path)?;
    tracing::info!(path = %output_path.display(), "grid image written");
    Ok(())
}
