//! Functions with high conditioning, unimodal (f10-f14).

use super::{condition, ratio, shifted, tasy, tosz_all, weighted_squares, Instance, RawFn};

/// f10: rotated ellipsoid.
pub fn ellipsoid_rotated(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);

    Box::new(move |x: &[f64]| -> f64 {
        let mut z = r.apply(&shifted(x, &xopt));
        tosz_all(&mut z);
        weighted_squares(&z, 10.0, 6.0)
    })
}

/// f11: discus, one sensitive direction.
pub fn discus(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);

    Box::new(move |x: &[f64]| -> f64 {
        let mut z = r.apply(&shifted(x, &xopt));
        tosz_all(&mut z);
        match z.split_first() {
            Some((head, tail)) => 1e6 * head * head + tail.iter().map(|v| v * v).sum::<f64>(),
            None => 0.0,
        }
    })
}

/// f12: bent cigar, one insensitive direction.
pub fn bent_cigar(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);

    Box::new(move |x: &[f64]| -> f64 {
        let mut z = r.apply(&shifted(x, &xopt));
        tasy(&mut z, 0.5);
        let z = r.apply(&z);
        match z.split_first() {
            Some((head, tail)) => head * head + 1e6 * tail.iter().map(|v| v * v).sum::<f64>(),
            None => 0.0,
        }
    })
}

/// f13: sharp ridge.
pub fn sharp_ridge(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);
    let q = inst.rotation(2);

    Box::new(move |x: &[f64]| -> f64 {
        let mut z = r.apply(&shifted(x, &xopt));
        condition(&mut z, 10.0);
        let z = q.apply(&z);
        match z.split_first() {
            Some((head, tail)) => head * head + 100.0 * tail.iter().map(|v| v * v).sum::<f64>().sqrt(),
            None => 0.0,
        }
    })
}

/// f14: different powers.
pub fn different_powers(inst: &Instance) -> RawFn {
    let xopt = inst.xopt.clone();
    let r = inst.rotation(1);

    Box::new(move |x: &[f64]| -> f64 {
        let z = r.apply(&shifted(x, &xopt));
        let d = z.len();
        z.iter()
            .enumerate()
            .map(|(i, v)| v.abs().powf(2.0 + 4.0 * ratio(i, d)))
            .sum::<f64>()
            .sqrt()
    })
}
