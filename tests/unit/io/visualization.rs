//! Tests for contest frame capture and GIF export

#[cfg(test)]
mod tests {
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgba};
    use pipetiles::algorithm::contest::ColorToken;
    use pipetiles::algorithm::driver::{StepDriver, run_contest};
    use pipetiles::algorithm::executor::WfcGrid;
    use pipetiles::io::configuration::{CELL_SIZE_PX, GIF_FRAME_DELAY_MS, MAX_IMAGE_DIMENSION_PX};
    use pipetiles::io::visualization::ContestCapture;
    use pipetiles::spatial::TileShape;
    use std::fs::File;
    use std::io::BufReader;

    // Tests that exporting without frames fails
    // Verified by writing an empty animation
    #[test]
    fn test_export_requires_frames() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let capture = ContestCapture::new(false);

        let result = capture.export_gif(&dir.path().join("empty.gif"), GIF_FRAME_DELAY_MS);

        assert!(result.is_err());
        assert_eq!(capture.frame_count(), 0);
    }

    // Tests one frame per contest pass plus the initial frame
    // Verified by recording only the final state
    #[test]
    fn test_capture_contest_frames() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output_path = dir.path().join("contest.gif");
        let mut grid = WfcGrid::with_seed(4, 4, 2);
        let _ = StepDriver::new((0, 0)).solve(&mut grid, 16, |_| {});

        let mut capture = ContestCapture::new(true);
        capture.record(&grid);
        let summary = run_contest(&mut grid, 5, |state, _| capture.record(state));

        assert_eq!(capture.frame_count(), summary.steps + 1);
        assert!(capture.export_gif(&output_path, GIF_FRAME_DELAY_MS).is_ok());
        assert!(output_path.exists());
    }

    // Tests that each frame shows the owner colors from when it was recorded
    // Verified by rendering every frame from the final grid
    #[test]
    fn test_frames_keep_recorded_colors() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output_path = dir.path().join("colors.gif");
        let mut grid = WfcGrid::with_seed(1, 1, 0);
        grid.deterministic_collapse(0, 0, TileShape::Vertical, false);

        let blue = grid.tokens.insert(ColorToken::new([0, 0, 255, 255], 1.0));
        let green = grid.tokens.insert(ColorToken::new([0, 255, 0, 255], 1.0));
        let mut capture = ContestCapture::new(false);
        grid.grid_state.set_token_id(0, 0, blue);
        capture.record(&grid);
        grid.grid_state.set_token_id(0, 0, green);
        capture.record(&grid);

        assert!(capture.export_gif(&output_path, GIF_FRAME_DELAY_MS).is_ok());

        let file = BufReader::new(File::open(&output_path).expect("Failed to open gif"));
        let frames = GifDecoder::new(file)
            .expect("Failed to read gif header")
            .into_frames()
            .collect_frames()
            .expect("Failed to decode frames");
        let pipe_pixel = |index: usize| {
            frames
                .get(index)
                .map(|frame| *frame.buffer().get_pixel(CELL_SIZE_PX / 2, 1))
        };

        assert_eq!(frames.len(), capture.frame_count() + 1);
        assert_eq!(pipe_pixel(0), Some(Rgba([0, 0, 255, 255])));
        assert_eq!(pipe_pixel(1), Some(Rgba([0, 255, 0, 255])));
        assert_eq!(pipe_pixel(2), Some(Rgba([0, 255, 0, 255])));
    }

    // Tests that oversized grids are rejected before any frame is encoded
    // Verified by skipping the size check
    #[test]
    fn test_export_rejects_oversized_frames() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output_path = dir.path().join("huge.gif");
        let tall = (MAX_IMAGE_DIMENSION_PX / CELL_SIZE_PX) as usize + 1;
        let mut capture = ContestCapture::new(false);
        capture.record(&WfcGrid::with_seed(1, tall, 0));

        assert!(capture.export_gif(&output_path, GIF_FRAME_DELAY_MS).is_err());
        assert!(!output_path.exists());
    }
}
