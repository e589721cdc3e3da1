//! Tests for probability normalization and entropy

#[cfg(test)]
mod tests {
    use pipetiles::math::probability::{normalize, weighted_entropy};

    // Tests normalization of positive weights
    // Verified by dividing by the count instead of the sum
    #[test]
    fn test_normalize() {
        let probabilities = normalize(&[1.0, 3.0]);
        assert_eq!(probabilities.len(), 2);
        assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((probabilities.first().copied().unwrap_or(0.0) - 0.25).abs() < 1e-12);
    }

    // Tests that degenerate input normalizes to zeros
    // Verified by dividing by a zero total
    #[test]
    fn test_normalize_zero_total() {
        assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(normalize(&[]).is_empty());
    }

    // Tests entropy of uniform and skewed distributions
    // Verified by using the natural logarithm
    #[test]
    fn test_weighted_entropy() {
        assert!((weighted_entropy(&[1.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((weighted_entropy(&[2.0; 4]) - 2.0).abs() < 1e-12);
        assert!((weighted_entropy(&[2.0, 1.0, 1.0]) - 1.5).abs() < 1e-12);
        assert!(weighted_entropy(&[5.0]).abs() < f64::EPSILON);
    }

    // Tests that zero-probability outcomes are ignored
    // Verified by including zero terms in the sum
    #[test]
    fn test_entropy_skips_zero_weights() {
        assert!((weighted_entropy(&[1.0, 0.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!(weighted_entropy(&[]).abs() < f64::EPSILON);
    }
}
