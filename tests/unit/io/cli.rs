//! Tests for command-line parsing and the run orchestration

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pipetiles::io::cli::{Cli, Runner, Strategy};
    use pipetiles::spatial::TileShape;
    use std::path::PathBuf;

    // Tests default argument values
    // Verified by changing the default strategy
    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pipetiles"]).expect("defaults should parse");

        assert_eq!((cli.width, cli.height), (30, 30));
        assert_eq!(cli.seed, 42);
        assert_eq!(cli.strategy, Strategy::Stepped);
        assert_eq!(cli.output, PathBuf::from("pipes.png"));
        assert!(cli.weights.is_empty());
        assert!(cli.should_show_progress());
    }

    // Tests repeated weight overrides and strategy selection
    // Verified by keeping only the last weight flag
    #[test]
    fn test_weights_and_strategy() {
        let cli = Cli::try_parse_from([
            "pipetiles",
            "--weight",
            "h=2",
            "--weight",
            "top-left=0.5",
            "--strategy",
            "batch",
            "-q",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.strategy, Strategy::Batch);
        assert_eq!(cli.weights.len(), 2);
        assert!(!cli.should_show_progress());

        let config = cli.solver_config().expect("config should validate");
        assert!((config.weights.get(TileShape::Horizontal) - 2.0).abs() < f64::EPSILON);
        assert!((config.weights.get(TileShape::TopLeftCorner) - 0.5).abs() < f64::EPSILON);
        assert!((config.weights.get(TileShape::Vertical) - 1.0).abs() < f64::EPSILON);
    }

    // Tests rejection of malformed overrides and dimensions
    // Verified by accepting negative weights
    #[test]
    fn test_invalid_arguments() {
        assert!(Cli::try_parse_from(["pipetiles", "--weight", "h=-1"]).is_err());
        assert!(Cli::try_parse_from(["pipetiles", "--weight", "pipe=1"]).is_err());
        assert!(Cli::try_parse_from(["pipetiles", "--strategy", "random"]).is_err());

        let cli = Cli::try_parse_from(["pipetiles", "--width", "0"]).expect("should parse");
        assert!(cli.solver_config().is_err());

        // Valid for the solver but too large to render
        let cli = Cli::try_parse_from(["pipetiles", "--height", "1000"]).expect("should parse");
        assert!(cli.solver_config().is_err());
    }

    // Tests that the animation lands next to the output image
    // Verified by writing the animation to the working directory
    #[test]
    fn test_visualization_path() {
        let cli = Cli::try_parse_from(["pipetiles", "--output", "out/grid.png"])
            .expect("arguments should parse");
        assert_eq!(
            cli.visualization_path(),
            PathBuf::from("out/grid_contest.gif")
        );
    }

    // Tests a full stepped run with contest and animation
    // Verified by skipping the export step
    #[test]
    fn test_stepped_run_writes_outputs() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = dir.path().join("pipes.png");
        let cli = Cli::try_parse_from([
            "pipetiles",
            "-W",
            "6",
            "-H",
            "5",
            "--contest-steps",
            "4",
            "--territory",
            "--visualize",
            "--quiet",
            "--output",
            output.to_str().expect("temp path should be UTF-8"),
        ])
        .expect("arguments should parse");
        let gif = cli.visualization_path();

        let summary = Runner::new(cli).run().expect("run should succeed");

        assert!(output.exists());
        assert!(gif.exists());
        assert_eq!(summary.collapsed + summary.contradictions, 30);
        assert!(summary.contest_steps <= 4);
    }

    // Tests a batch run with the contest disabled
    // Verified by running the contest regardless of the step budget
    #[test]
    fn test_batch_run_without_contest() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = dir.path().join("batch.png");
        let cli = Cli::try_parse_from([
            "pipetiles",
            "-W",
            "7",
            "-H",
            "7",
            "--strategy",
            "batch",
            "--contest-steps",
            "0",
            "--quiet",
            "--output",
            output.to_str().expect("temp path should be UTF-8"),
        ])
        .expect("arguments should parse");

        let summary = Runner::new(cli).run().expect("run should succeed");

        assert!(output.exists());
        assert_eq!(summary.contest_steps, 0);
        assert_eq!(summary.collapsed + summary.contradictions, 49);
    }

    // Tests that a starting cell outside the grid is rejected
    // Verified by clamping the start coordinates
    #[test]
    fn test_start_outside_grid() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = dir.path().join("never.png");
        let cli = Cli::try_parse_from([
            "pipetiles",
            "-W",
            "3",
            "-H",
            "3",
            "--start-x",
            "3",
            "--quiet",
            "--output",
            output.to_str().expect("temp path should be UTF-8"),
        ])
        .expect("arguments should parse");

        assert!(Runner::new(cli).run().is_err());
        assert!(!output.exists());
    }
}
