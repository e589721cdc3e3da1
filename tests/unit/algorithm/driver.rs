//! Tests for the stepping, batch and contest loops

#[cfg(test)]
mod tests {
    use pipetiles::algorithm::driver::{Batch, BatchDriver, StepDriver, run_contest};
    use pipetiles::algorithm::domain::TileSet;
    use pipetiles::algorithm::executor::WfcGrid;

    // Tests that stepping resolves every cell within one collapse per cell
    // Verified by not advancing the cursor between iterations
    #[test]
    fn test_step_driver_terminates() {
        let mut grid = WfcGrid::with_seed(8, 8, 11);
        let mut driver = StepDriver::new((0, 0));
        let mut calls = 0;

        let steps = driver.solve(&mut grid, 64, |_| calls += 1);

        assert!(matches!(steps, Ok(n) if n <= 64 && n == calls));
        assert!(grid.is_fully_resolved());
    }

    // Tests the first iteration collapses the starting cell
    // Verified by collapsing the lowest-entropy cell first
    #[test]
    fn test_step_driver_starts_at_cursor() {
        let mut grid = WfcGrid::with_seed(4, 4, 3);
        let mut driver = StepDriver::new((2, 1));

        assert!(matches!(driver.run_iteration(&mut grid), Ok(true)));
        assert!(grid.get_tile(2, 1).is_collapsed());
        assert_eq!(driver.steps, 1);
    }

    // Tests batch regions and their one-cell overlap
    // Verified by dropping the upper-left widening
    #[test]
    fn test_batch_regions() {
        assert_eq!(
            Batch::region(0, 0, 12, 12),
            Batch {
                xs: 0..6,
                ys: 0..6
            }
        );
        assert_eq!(
            Batch::region(1, 2, 12, 12),
            Batch {
                xs: 4..10,
                ys: 9..12
            }
        );
        assert_eq!(Batch::region(0, 0, 3, 2).cells().count(), 6);
        assert_eq!(BatchDriver::new(12, 7).remaining(), 6);
    }

    // Tests that batch solving leaves no undecided cell
    // Verified by skipping the last batch column
    #[test]
    fn test_batch_driver_resolves_grid() {
        let mut grid = WfcGrid::with_seed(11, 9, 21);
        let mut driver = BatchDriver::new(11, 9);
        let mut seen = 0;

        let reports = driver.solve(&mut grid, |_| seen += 1);

        assert_eq!(reports.len(), 6);
        assert_eq!(seen, 6);
        assert_eq!(driver.remaining(), 0);
        assert!(grid.is_fully_resolved());
        assert!(reports.iter().all(|report| report.attempts >= 1));
    }

    // Tests that retries stop at the configured limit
    // Verified by retrying without bound
    #[test]
    fn test_batch_retry_limit() {
        let mut grid = WfcGrid::with_seed(6, 6, 8);
        let mut driver = BatchDriver::new(6, 6).with_max_retries(0);

        while let Some(report) = driver.run_batch(&mut grid) {
            assert_eq!(report.attempts, 1);
        }
    }

    // Tests that a contradicted block is reset and solved again
    // Verified by collapsing again without resetting the block
    #[test]
    fn test_batch_retry_resets_region() {
        let mut grid = WfcGrid::with_seed(1, 1, 4);
        grid.grid_state.set_domain(0, 0, TileSet::empty());
        let mut driver = BatchDriver::new(1, 1);

        let report = driver.run_batch(&mut grid);

        assert!(matches!(report, Some(ref r) if r.attempts == 2 && r.clean));
        assert!(grid.get_tile(0, 0).is_collapsed());
    }

    // Tests that a block out of retries is accepted with its contradiction
    // Verified by reporting every accepted block as clean
    #[test]
    fn test_batch_accepted_unclean() {
        let mut grid = WfcGrid::with_seed(1, 1, 4);
        grid.grid_state.set_domain(0, 0, TileSet::empty());
        let mut driver = BatchDriver::new(1, 1).with_max_retries(0);

        let report = driver.run_batch(&mut grid);

        assert!(matches!(report, Some(ref r) if r.attempts == 1 && !r.clean));
        assert!(grid.get_tile(0, 0).is_empty());
    }

    // Tests that the contest stops at a pass that changes nothing
    // Verified by ignoring the change flag
    #[test]
    fn test_contest_reaches_fixed_point() {
        let mut grid = WfcGrid::with_seed(6, 6, 13);
        let _ = StepDriver::new((0, 0)).solve(&mut grid, 36, |_| {});
        let mut passes = Vec::new();

        let summary = run_contest(&mut grid, 10_000, |_, step| passes.push(step));

        assert!(summary.stable);
        assert_eq!(passes.len(), summary.steps);
        assert!(summary.promotions <= summary.battles);
        assert!(!grid.simulate_color_step());
    }

    // Tests that the contest honors its pass budget
    // Verified by running one pass past the limit
    #[test]
    fn test_contest_step_limit() {
        let mut grid = WfcGrid::with_seed(6, 6, 13);
        let _ = StepDriver::new((0, 0)).solve(&mut grid, 36, |_| {});

        let summary = run_contest(&mut grid, 0, |_, _| {});

        assert_eq!(summary.steps, 0);
        assert!(!summary.stable);
    }
}
