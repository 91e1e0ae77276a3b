//! Multi-modal functions with adequate global structure (f15-f19).

use std::f64::consts::PI;

use super::{
    condition, penalty, rastrigin_core, rosenbrock_scale, shifted, tasy, tosz_all, Instance, RawFn,
};

/// Number of terms in the Weierstrass series
const WEIERSTRASS_TERMS: i32 = 12;

/// f15: rotated Rastrigin.
pub fn rastrigin_rotated(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);
    let q = inst.rotation(2);

    Box::new(move |x: &[f64]| -> f64 {
        let mut z = r.apply(&shifted(x, &xopt));
        tosz_all(&mut z);
        tasy(&mut z, 0.2);
        let mut z = q.apply(&z);
        condition(&mut z, 10.0);
        rastrigin_core(&r.apply(&z))
    })
}

/// f16: Weierstrass.
pub fn weierstrass(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);
    let q = inst.rotation(2);
    let f0: f64 = (0..WEIERSTRASS_TERMS)
        .map(|k| 0.5f64.powi(k) * (PI * 3f64.powi(k)).cos())
        .sum();

    Box::new(move |x: &[f64]| -> f64 {
        let d = x.len() as f64;
        let mut z = r.apply(&shifted(x, &xopt));
        tosz_all(&mut z);
        let mut z = q.apply(&z);
        condition(&mut z, 0.01);
        let z = r.apply(&z);

        let series: f64 = z
            .iter()
            .map(|zi| {
                (0..WEIERSTRASS_TERMS)
                    .map(|k| 0.5f64.powi(k) * (2.0 * PI * 3f64.powi(k) * (zi + 0.5)).cos())
                    .sum::<f64>()
            })
            .sum();
        10.0 * (series / d - f0).powi(3) + 10.0 / d * penalty(x)
    })
}

fn schaffers(inst: &Instance, conditioning: f64) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);
    let q = inst.rotation(2);

    Box::new(move |x: &[f64]| -> f64 {
        let mut z = r.apply(&shifted(x, &xopt));
        tasy(&mut z, 0.5);
        let mut z = q.apply(&z);
        condition(&mut z, conditioning);

        let pairs = z.len().saturating_sub(1).max(1) as f64;
        let sum: f64 = z
            .windows(2)
            .map(|w| {
                let s = (w[0] * w[0] + w[1] * w[1]).sqrt();
                s.sqrt() + s.sqrt() * (50.0 * s.powf(0.2)).sin().powi(2)
            })
            .sum();
        (sum / pairs).powi(2) + 10.0 * penalty(x)
    })
}

/// f17: Schaffers F7, condition 10.
pub fn schaffers10(inst: &Instance) -> RawFn {
    schaffers(inst, 10.0)
}

/// f18: Schaffers F7, moderately ill-conditioned.
pub fn schaffers1000(inst: &Instance) -> RawFn {
    schaffers(inst, 1000.0)
}

/// f19: composite Griewank-Rosenbrock F8F2.
pub fn griewank_rosenbrock(inst: &Instance) -> RawFn {
    let r = inst.rotation(1);
    let scale = rosenbrock_scale(inst.dimension);

    Box::new(move |x: &[f64]| -> f64 {
        if x.len() < 2 {
            return 0.0;
        }
        let z: Vec<f64> = r.apply(x).iter().map(|v| scale * v + 0.5).collect();
        let terms = (z.len() - 1) as f64;
        let sum: f64 = z
            .windows(2)
            .map(|w| {
                let s = 100.0 * (w[0] * w[0] - w[1]).powi(2) + (w[0] - 1.0).powi(2);
                s / 4000.0 - s.cos()
            })
            .sum();
        10.0 * sum / terms + 10.0
    })
}
