//! Raw BBOB landscapes and the transformations they are built from.
//!
//! Each function takes the seeded [`Instance`] and returns the objective
//! without the `f_opt` offset; the parent module adds it.
//!
//! ## Building blocks
//!
//! - `T_osz`: oscillation of the objective or of each variable
//! - `T_asy^β`: asymmetric stretching of positive variables
//! - `Λ^α`: diagonal conditioning with factors `α^(0.5 i / (D - 1))`
//! - `f_pen`: quadratic penalty outside `[-5, 5]`

mod ill_conditioned;
mod moderate;
mod multimodal;
mod separable;
mod weak_structure;

pub use ill_conditioned::{bent_cigar, different_powers, discus, ellipsoid_rotated, sharp_ridge};
pub use moderate::{attractive_sector, rosenbrock, rosenbrock_rotated, step_ellipsoid};
pub use multimodal::{griewank_rosenbrock, rastrigin_rotated, schaffers10, schaffers1000, weierstrass};
pub use separable::{bueche_rastrigin, ellipsoid, linear_slope, rastrigin, sphere};
pub use weak_structure::{gallagher101, gallagher21, katsuura, lunacek_bi_rastrigin, schwefel};

pub use super::Instance;

/// `i / (D - 1)`, or 0 in one dimension
#[inline]
pub fn ratio(i: usize, d: usize) -> f64 {
    i as f64 / (d.max(2) - 1) as f64
}

/// Conditioning factor of coordinate `i` in `Λ^α`
#[inline]
pub fn lambda(alpha: f64, i: usize, d: usize) -> f64 {
    alpha.powf(0.5 * ratio(i, d))
}

/// Oscillation transformation of a single value
pub fn tosz(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let xhat = x.abs().ln();
    let (c1, c2) = if x > 0.0 { (10.0, 7.9) } else { (5.5, 3.1) };
    x.signum() * (xhat + 0.049 * ((c1 * xhat).sin() + (c2 * xhat).sin())).exp()
}

pub fn tosz_all(x: &mut [f64]) {
    x.iter_mut().for_each(|v| *v = tosz(*v));
}

/// Asymmetric transformation `T_asy^β`
pub fn tasy(x: &mut [f64], beta: f64) {
    let d = x.len();
    for (i, v) in x.iter_mut().enumerate() {
        if *v > 0.0 {
            *v = v.powf(1.0 + beta * ratio(i, d) * v.sqrt());
        }
    }
}

/// Multiply by `Λ^α`
pub fn condition(x: &mut [f64], alpha: f64) {
    let d = x.len();
    for (i, v) in x.iter_mut().enumerate() {
        *v *= lambda(alpha, i, d);
    }
}

/// Boundary penalty `Σ max(0, |x_i| - 5)^2`
pub fn penalty(x: &[f64]) -> f64 {
    x.iter().map(|v| (v.abs() - 5.0).max(0.0).powi(2)).sum()
}

/// `x - x_opt`
pub fn shifted(x: &[f64], xopt: &[f64]) -> Vec<f64> {
    x.iter().zip(xopt).map(|(a, b)| a - b).collect()
}

/// Rastrigin core `10 (D - Σ cos 2πz) + ||z||²`
pub fn rastrigin_core(z: &[f64]) -> f64 {
    let d = z.len() as f64;
    let cosines: f64 = z.iter().map(|v| (2.0 * std::f64::consts::PI * v).cos()).sum();
    let squares: f64 = z.iter().map(|v| v * v).sum();
    10.0 * (d - cosines) + squares
}

/// Rosenbrock core `Σ 100 (z_i² - z_{i+1})² + (z_i - 1)²`
pub fn rosenbrock_core(z: &[f64]) -> f64 {
    z.windows(2)
        .map(|w| 100.0 * (w[0] * w[0] - w[1]).powi(2) + (w[0] - 1.0).powi(2))
        .sum()
}

/// Scaling applied by the Rosenbrock family
pub fn rosenbrock_scale(d: usize) -> f64 {
    ((d as f64).sqrt() / 8.0).max(1.0)
}

/// Weighted sum of squares with weights `base^(exponent * i / (D - 1))`
pub fn weighted_squares(z: &[f64], base: f64, exponent: f64) -> f64 {
    let d = z.len();
    z.iter()
        .enumerate()
        .map(|(i, v)| base.powf(exponent * ratio(i, d)) * v * v)
        .sum()
}

/// Type alias for the raw objective a BBOB builder returns
pub type RawFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;
