/// Normalize weights into probabilities
///
/// Returns all zeros when the weights do not sum to a positive value.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|&weight| weight / total).collect()
}

/// Shannon entropy in bits of the distribution proportional to `weights`
///
/// Zero-probability outcomes contribute nothing; an empty or all-zero input has
/// entropy 0.
pub fn weighted_entropy(weights: &[f64]) -> f64 {
    normalize(weights)
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}
