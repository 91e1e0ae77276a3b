//! Functions with low or moderate conditioning (f6-f9).

use super::{
    condition, penalty, ratio, rosenbrock_core, rosenbrock_scale, shifted, tosz, Instance, RawFn,
};

/// f6: attractive sector, steep on the half-spaces facing away from `x_opt`.
pub fn attractive_sector(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);
    let q = inst.rotation(2);

    Box::new(move |x: &[f64]| -> f64 {
        let mut z = r.apply(&shifted(x, &xopt));
        condition(&mut z, 10.0);
        let z = q.apply(&z);
        let sum: f64 = z
            .iter()
            .zip(&xopt)
            .map(|(zi, xo)| {
                let s = if zi * xo > 0.0 { 100.0 } else { 1.0 };
                (s * zi).powi(2)
            })
            .sum();
        tosz(sum).powf(0.9)
    })
}

/// f7: step ellipsoid with plateaus.
pub fn step_ellipsoid(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);
    let q = inst.rotation(2);

    Box::new(move |x: &[f64]| -> f64 {
        let mut zhat = r.apply(&shifted(x, &xopt));
        condition(&mut zhat, 10.0);
        let ztilde: Vec<f64> = zhat
            .iter()
            .map(|&v| {
                if v.abs() > 0.5 {
                    (0.5 + v).floor()
                } else {
                    (0.5 + 10.0 * v).floor() / 10.0
                }
            })
            .collect();
        let z = q.apply(&ztilde);
        let d = z.len();
        let sum: f64 = z
            .iter()
            .enumerate()
            .map(|(i, v)| 10f64.powf(2.0 * ratio(i, d)) * v * v)
            .sum();
        let first = zhat.first().map_or(0.0, |v| v.abs() / 1e4);
        0.1 * first.max(sum) + penalty(x)
    })
}

/// f8: Rosenbrock, original.
pub fn rosenbrock(inst: &Instance) -> RawFn {
    let xopt: Vec<f64> = inst.xopt.iter().map(|v| 0.75 * v).collect();
    let scale = rosenbrock_scale(xopt.len());

    Box::new(move |x: &[f64]| -> f64 {
        let z: Vec<f64> = x
            .iter()
            .zip(&xopt)
            .map(|(a, b)| scale * (a - b) + 1.0)
            .collect();
        rosenbrock_core(&z)
    })
}

/// f9: Rosenbrock, rotated.
pub fn rosenbrock_rotated(inst: &Instance) -> RawFn {
    let r = inst.rotation(1);
    let scale = rosenbrock_scale(inst.dimension);

    Box::new(move |x: &[f64]| -> f64 {
        let z: Vec<f64> = r.apply(x).iter().map(|v| scale * v + 0.5).collect();
        rosenbrock_core(&z)
    })
}
