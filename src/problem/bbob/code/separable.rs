//! Separable functions (f1-f5).

use super::{
    condition, penalty, rastrigin_core, ratio, shifted, tasy, tosz_all, weighted_squares, Instance,
    RawFn,
};

/// f1: `||x - x_opt||²`.
pub fn sphere(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    Box::new(move |x: &[f64]| -> f64 { x.iter().zip(&xopt).map(|(a, b)| (a - b).powi(2)).sum() })
}

/// f2: separable ellipsoid with condition number 10^6.
pub fn ellipsoid(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    Box::new(move |x: &[f64]| -> f64 {
        let mut z = shifted(x, &xopt);
        tosz_all(&mut z);
        weighted_squares(&z, 10.0, 6.0)
    })
}

/// f3: separable Rastrigin.
pub fn rastrigin(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    Box::new(move |x: &[f64]| -> f64 {
        let mut z = shifted(x, &xopt);
        tosz_all(&mut z);
        tasy(&mut z, 0.2);
        condition(&mut z, 10.0);
        rastrigin_core(&z)
    })
}

/// f4: Büche-Rastrigin, with positive odd coordinates stretched by 10.
pub fn bueche_rastrigin(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    Box::new(move |x: &[f64]| -> f64 {
        let mut z = shifted(x, &xopt);
        tosz_all(&mut z);
        let d = z.len();
        for (i, v) in z.iter_mut().enumerate() {
            let s = 10f64.powf(0.5 * ratio(i, d));
            // Odd coordinates in 1-based numbering
            *v *= if i % 2 == 0 && *v > 0.0 { 10.0 * s } else { s };
        }
        rastrigin_core(&z) + 100.0 * penalty(x)
    })
}

/// f5: linear slope with the optimum on a corner of `[-5, 5]^D`.
pub fn linear_slope(inst: &Instance) -> RawFn {
    let xopt: Vec<f64> = inst
        .xopt
        .iter()
        .map(|&v| if v >= 0.0 { 5.0 } else { -5.0 })
        .collect();
    let d = xopt.len();
    let slopes: Vec<f64> = xopt
        .iter()
        .enumerate()
        .map(|(i, v)| v.signum() * 10f64.powf(ratio(i, d)))
        .collect();

    Box::new(move |x: &[f64]| -> f64 {
        x.iter()
            .zip(&xopt)
            .zip(&slopes)
            .map(|((&xi, &xo), &s)| {
                let z = if xi * xo < 25.0 { xi } else { xo };
                5.0 * s.abs() - s * z
            })
            .sum()
    })
}
