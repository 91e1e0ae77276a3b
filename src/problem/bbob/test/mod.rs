//! Tests for the BBOB suite.

use super::code::{penalty, rastrigin_core, rosenbrock_core, tasy, tosz};
use super::{Instance, BOUNDS, FUNCTIONS};
use crate::problem::Optimization;
use proptest::prelude::*;

const EPSILON: f64 = 1e-6;

fn assert_close(a: f64, b: f64, msg: &str) {
    let diff = (a - b).abs();
    assert!(diff < EPSILON, "{}: expected {}, got {}, diff = {}", msg, b, a, diff);
}

/// Functions whose minimum sits exactly at `x_opt`
const OPTIMUM_AT_XOPT: [u32; 16] = [1, 2, 3, 4, 6, 7, 10, 11, 12, 13, 14, 15, 16, 17, 18, 23];

#[test]
fn test_table_is_sorted_and_complete() {
    assert_eq!(FUNCTIONS.len(), 24);
    for (i, def) in FUNCTIONS.iter().enumerate() {
        assert_eq!(def.fid as usize, i + 1, "{}", def.name);
    }
}

#[test]
fn test_instance_is_deterministic() {
    let a = Instance::new(3, 1, 10);
    let b = Instance::new(3, 1, 10);
    assert_eq!(a, b);
    assert_ne!(a, Instance::new(3, 2, 10));
    assert_eq!(a.rotation(1), b.rotation(1));
    assert_ne!(a.rotation(1), a.rotation(2));
}

#[test]
fn test_instance_ranges() {
    for iid in 1..=10 {
        let inst = Instance::new(1, iid, 20);
        assert_eq!(inst.xopt.len(), 20);
        assert!(inst.xopt.iter().all(|v| v.abs() <= 4.0 && *v != 0.0));
        assert!(inst.fopt.abs() <= 1000.0);
    }
}

#[test]
fn test_value_at_optimum() {
    for def in FUNCTIONS.iter().filter(|d| OPTIMUM_AT_XOPT.contains(&d.fid)) {
        for dim in [2usize, 5, 10] {
            let mut problem = (def.construct)(1, dim);
            let inst = Instance::new(def.fid, 1, dim);
            let y = problem.evaluate(&inst.xopt).unwrap();
            assert_close(y, inst.fopt, def.name);
            assert!(problem.state().optimum_found, "{} d={}", def.name, dim);
        }
    }
}

#[test]
fn test_sphere_value() {
    let mut problem = super::sphere(1, 3);
    let inst = Instance::new(1, 1, 3);
    let x: Vec<f64> = inst.xopt.iter().map(|v| v + 1.0).collect();
    assert_close(problem.evaluate(&x).unwrap(), inst.fopt + 3.0, "sphere");
}

#[test]
fn test_rosenbrock_optimum_is_scaled() {
    let inst = Instance::new(8, 1, 4);
    let x: Vec<f64> = inst.xopt.iter().map(|v| 0.75 * v).collect();
    let mut problem = super::rosenbrock(1, 4);
    assert_close(problem.evaluate(&x).unwrap(), inst.fopt, "rosenbrock");
}

#[test]
fn test_linear_slope_corner() {
    let inst = Instance::new(5, 1, 6);
    let corner: Vec<f64> = inst.xopt.iter().map(|v| 5f64.copysign(*v)).collect();
    let mut problem = super::linear_slope(1, 6);
    assert_close(problem.evaluate(&corner).unwrap(), inst.fopt, "linear_slope");
}

#[test]
fn test_metadata() {
    for def in FUNCTIONS.iter() {
        let problem = (def.construct)(2, 5);
        let meta = problem.meta();
        assert_eq!(meta.fid, def.fid);
        assert_eq!(meta.iid, 2);
        assert_eq!(meta.dimension, 5);
        assert_eq!(meta.name, def.name);
        assert_eq!(meta.optimization, Optimization::Minimization);
        assert_eq!(problem.bounds(), BOUNDS);
        assert_eq!(problem.optimum(), Some(Instance::new(def.fid, 2, 5).fopt));
    }
}

#[test]
fn test_building_blocks() {
    assert_eq!(tosz(0.0), 0.0);
    assert_close(tosz(1.0), 1.0, "tosz(1)");
    assert!(tosz(-2.0) < 0.0);

    let mut z = [1.0, 4.0, -1.0];
    tasy(&mut z, 0.5);
    assert_eq!(z[0], 1.0);
    assert!(z[1] > 4.0);
    assert_eq!(z[2], -1.0);

    assert_eq!(penalty(&[5.0, -5.0, 0.0]), 0.0);
    assert_close(penalty(&[6.0, -7.0]), 5.0, "penalty");
    assert_close(rastrigin_core(&[0.0, 0.0]), 0.0, "rastrigin");
    assert_close(rosenbrock_core(&[1.0, 1.0, 1.0]), 0.0, "rosenbrock");
}

proptest! {
    #[test]
    fn prop_evaluation_is_pure(fid in 1u32..=24, seed in 0u64..1000) {
        let def = &FUNCTIONS[fid as usize - 1];
        let mut a = (def.construct)(1, 4);
        let mut b = (def.construct)(1, 4);
        let x = crate::utils::random::uniform_vec(&mut crate::utils::random::seeded(seed), 4, -5.0, 5.0);
        let ya = a.evaluate(&x).unwrap();
        let yb = b.evaluate(&x).unwrap();
        prop_assert!(ya.is_finite());
        prop_assert_eq!(ya.to_bits(), yb.to_bits());
    }

    #[test]
    fn prop_optimum_is_lower_bound(fid in prop::sample::select(OPTIMUM_AT_XOPT.to_vec()), seed in 0u64..200) {
        let def = &FUNCTIONS[fid as usize - 1];
        let mut problem = (def.construct)(1, 3);
        let fopt = problem.optimum().unwrap();
        let x = crate::utils::random::uniform_vec(&mut crate::utils::random::seeded(seed), 3, -5.0, 5.0);
        let y = problem.evaluate(&x).unwrap();
        prop_assert!(y >= fopt - EPSILON, "{}: {} < {}", def.name, y, fopt);
    }
}
