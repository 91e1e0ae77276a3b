//! Low Autocorrelation Binary Sequences.

/// Merit factor `n^2 / (2 E)` of the ±1 sequence encoded by `x`, where `E`
/// is the sum of squared aperiodic autocorrelations.
///
/// A sequence with zero energy (only possible for `n == 1`) scores `n`.
pub fn labs(x: &[i32]) -> f64 {
    let n = x.len();
    let s: Vec<i64> = x.iter().map(|&b| if b == 1 { 1 } else { -1 }).collect();

    let energy: i64 = (1..n)
        .map(|k| {
            let c: i64 = (0..n - k).map(|i| s[i] * s[i + k]).sum();
            c * c
        })
        .sum();

    if energy == 0 {
        return n as f64;
    }
    (n * n) as f64 / (2.0 * energy as f64)
}
