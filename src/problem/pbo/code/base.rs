//! The three base pseudo-Boolean functions.

/// Number of ones in `x`.
///
/// # Example
/// ```
/// use iohkit::problem::pbo::code::one_max;
///
/// assert_eq!(one_max(&[1, 0, 1, 1]), 3.0);
/// ```
pub fn one_max(x: &[i32]) -> f64 {
    x.iter().filter(|&&b| b == 1).count() as f64
}

/// Length of the longest prefix of ones.
pub fn leading_ones(x: &[i32]) -> f64 {
    x.iter().take_while(|&&b| b == 1).count() as f64
}

/// Weighted sum with weight `i + 1` for bit `i`.
pub fn linear(x: &[i32]) -> f64 {
    x.iter()
        .enumerate()
        .filter(|(_, &b)| b == 1)
        .map(|(i, _)| (i + 1) as f64)
        .sum()
}
