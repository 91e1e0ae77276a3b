//! Multi-modal functions with weak global structure (f20-f24).

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{condition, penalty, ratio, shifted, tosz, Instance, RawFn};
use crate::utils::random::seeded;

const SCHWEFEL_OPTIMUM: f64 = 4.2096874633;
const SCHWEFEL_OFFSET: f64 = 4.189828872724339;
const KATSUURA_TERMS: i32 = 32;

/// f20: Schwefel `x sin(x)`.
pub fn schwefel(inst: &Instance) -> RawFn {
    let mut rng = seeded(inst.seed);
    let signs: Vec<f64> = (0..inst.dimension)
        .map(|_| if rng.random_bool(0.5) { 1.0 } else { -1.0 })
        .collect();
    let xopt: Vec<f64> = signs.iter().map(|s| s * 0.5 * SCHWEFEL_OPTIMUM).collect();

    Box::new(move |x: &[f64]| -> f64 {
        let d = x.len();
        if d == 0 {
            return 0.0;
        }
        let xhat: Vec<f64> = x.iter().zip(&signs).map(|(v, s)| 2.0 * s * v).collect();

        let mut z = vec![0.0; d];
        z[0] = xhat[0];
        for i in 1..d {
            z[i] = xhat[i] + 0.25 * (xhat[i - 1] - 2.0 * xopt[i - 1].abs());
        }
        let mut shifted_z: Vec<f64> = z
            .iter()
            .zip(&xopt)
            .map(|(zi, xo)| zi - 2.0 * xo.abs())
            .collect();
        condition(&mut shifted_z, 10.0);
        let z: Vec<f64> = shifted_z
            .iter()
            .zip(&xopt)
            .map(|(zi, xo)| 100.0 * (zi + 2.0 * xo.abs()))
            .collect();

        let sum: f64 = z.iter().map(|v| v * v.abs().sqrt().sin()).sum();
        let scaled: Vec<f64> = z.iter().map(|v| v / 100.0).collect();
        -sum / (100.0 * d as f64) + SCHWEFEL_OFFSET + 100.0 * penalty(&scaled)
    })
}

struct Peaks {
    locations: Vec<Vec<f64>>,
    weights: Vec<f64>,
    scales: Vec<Vec<f64>>,
}

fn peaks(inst: &Instance, count: usize, spread: f64, top_condition: f64) -> Peaks {
    let d = inst.dimension;
    let mut rng = seeded(inst.seed);

    let mut weights = Vec::with_capacity(count);
    weights.push(10.0);
    for i in 1..count {
        weights.push(1.1 + 8.0 * (i - 1) as f64 / (count - 2).max(1) as f64);
    }

    let mut conditions: Vec<f64> = (1..count)
        .map(|i| 1000f64.powf(2.0 * (i - 1) as f64 / (count - 2).max(1) as f64))
        .collect();
    conditions.shuffle(&mut rng);
    conditions.insert(0, top_condition);

    let scales = conditions
        .iter()
        .map(|&alpha| {
            let mut diag: Vec<f64> = (0..d)
                .map(|j| alpha.powf(0.5 * ratio(j, d)) / alpha.powf(0.25))
                .collect();
            diag.shuffle(&mut rng);
            diag
        })
        .collect();

    let mut locations = Vec::with_capacity(count);
    locations.push(inst.xopt.iter().map(|v| v * 0.8).collect());
    for _ in 1..count {
        locations.push((0..d).map(|_| rng.random_range(-spread..spread)).collect());
    }

    Peaks {
        locations,
        weights,
        scales,
    }
}

fn gallagher(inst: &Instance, count: usize, spread: f64, top_condition: f64) -> RawFn {
    let r = inst.rotation(1);
    let peaks = peaks(inst, count, spread, top_condition);
    let rotated: Vec<Vec<f64>> = peaks.locations.iter().map(|y| r.apply(y)).collect();

    Box::new(move |x: &[f64]| -> f64 {
        let d = x.len() as f64;
        let rx = r.apply(x);
        let best = rotated
            .iter()
            .zip(&peaks.weights)
            .zip(&peaks.scales)
            .map(|((y, w), c)| {
                let quad: f64 = rx
                    .iter()
                    .zip(y)
                    .zip(c)
                    .map(|((a, b), ci)| ci * (a - b).powi(2))
                    .sum();
                w * (-quad / (2.0 * d)).exp()
            })
            .fold(f64::NEG_INFINITY, f64::max);
        tosz(10.0 - best).powi(2) + penalty(x)
    })
}

/// f21: Gallagher with 101 peaks.
pub fn gallagher101(inst: &Instance) -> RawFn {
    gallagher(inst, 101, 5.0, 1000.0)
}

/// f22: Gallagher with 21 peaks.
pub fn gallagher21(inst: &Instance) -> RawFn {
    gallagher(inst, 21, 4.9, 1000f64.powi(2))
}

/// f23: Katsuura.
pub fn katsuura(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);
    let q = inst.rotation(2);
    let powers: Vec<f64> = (1..=KATSUURA_TERMS).map(|j| 2f64.powi(j)).collect();

    Box::new(move |x: &[f64]| -> f64 {
        let d = x.len() as f64;
        let mut z = r.apply(&shifted(x, &xopt));
        condition(&mut z, 100.0);
        let z = q.apply(&z);

        let exponent = 10.0 / d.powf(1.2);
        let product: f64 = z
            .iter()
            .enumerate()
            .map(|(i, zi)| {
                let inner: f64 = powers
                    .iter()
                    .map(|p| (p * zi - (p * zi).round()).abs() / p)
                    .sum();
                (1.0 + (i + 1) as f64 * inner).powf(exponent)
            })
            .product();
        let factor = 10.0 / (d * d);
        factor * product - factor + penalty(x)
    })
}

/// f24: Lunacek bi-Rastrigin.
pub fn lunacek_bi_rastrigin(inst: &Instance) -> RawFn {
    const MU0: f64 = 2.5;
    const DEPTH: f64 = 1.0;

    let d = inst.dimension;
    let mut rng = seeded(inst.seed);
    let signs: Vec<f64> = (0..d)
        .map(|_| if rng.random_bool(0.5) { 1.0 } else { -1.0 })
        .collect();
    let s = 1.0 - 1.0 / (2.0 * (d as f64 + 20.0).sqrt() - 8.2);
    let mu1 = -((MU0 * MU0 - DEPTH) / s).sqrt();
    let r = inst.rotation(1);
    let q = inst.rotation(2);

    Box::new(move |x: &[f64]| -> f64 {
        let xhat: Vec<f64> = x.iter().zip(&signs).map(|(v, sg)| 2.0 * sg * v).collect();

        let first: f64 = xhat.iter().map(|v| (v - MU0).powi(2)).sum();
        let second: f64 = xhat.iter().map(|v| (v - mu1).powi(2)).sum();
        let bowls = first.min(DEPTH * d as f64 + s * second);

        let centred: Vec<f64> = xhat.iter().map(|v| v - MU0).collect();
        let mut z = r.apply(&centred);
        condition(&mut z, 100.0);
        let z = q.apply(&z);
        let cosines: f64 = z.iter().map(|v| (2.0 * PI * v).cos()).sum();

        bowls + 10.0 * (d as f64 - cosines) + 1e4 * penalty(x)
    })
}
