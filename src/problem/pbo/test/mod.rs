//! Tests for the PBO suite.

use super::code::wmodel::*;
use super::code::*;
use super::{InstanceTransform, Optimization, FUNCTIONS};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn assert_close(a: f64, b: f64, msg: &str) {
    let diff = (a - b).abs();
    assert!(diff < EPSILON, "{}: expected {}, got {}, diff = {}", msg, b, a, diff);
}

#[test]
fn test_base_functions() {
    let x = [1, 1, 0, 1, 0];
    assert_close(one_max(&x), 3.0, "one_max");
    assert_close(leading_ones(&x), 2.0, "leading_ones");
    // 1 + 2 + 4
    assert_close(linear(&x), 7.0, "linear");
    assert_close(one_max(&[]), 0.0, "one_max empty");
}

#[test]
fn test_neutrality_majority() {
    assert_eq!(neutrality(&[1, 1, 0, 0, 0, 1, 1], 3), vec![1, 0]);
    assert_eq!(neutrality(&[1, 1], 3), Vec::<i32>::new());
}

#[test]
fn test_epistasis_keeps_all_ones() {
    assert_eq!(epistasis(&[1; 10], 4), vec![1; 10]);
    assert_eq!(epistasis(&[0; 6], 4), vec![0; 6]);
}

#[test]
fn test_dummy_positions_are_stable() {
    let a = dummy_positions(20, 0.5, DUMMY_SEED);
    let b = dummy_positions(20, 0.5, DUMMY_SEED);
    assert_eq!(a, b);
    assert_eq!(a.len(), 10);
    assert!(a.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_ruggedness_keeps_optimum_unique() {
    for n in [7usize, 10, 16] {
        let top1 = ruggedness1(n as f64, n);
        let top2 = ruggedness2(n as f64, n);
        let table = ruggedness3_table(n);
        let top3 = ruggedness3(n as f64, &table);
        for y in 0..n {
            let y = y as f64;
            assert!(ruggedness1(y, n) < top1, "r1 n={} y={}", n, y);
            assert!(ruggedness2(y, n) < top2, "r2 n={} y={}", n, y);
            assert!(ruggedness3(y, &table) < top3, "r3 n={} y={}", n, y);
        }
    }
}

#[test]
fn test_ruggedness3_table_layout() {
    let table = ruggedness3_table(10);
    assert_eq!(table, vec![4.0, 3.0, 2.0, 1.0, 0.0, 9.0, 8.0, 7.0, 6.0, 5.0, 10.0]);
}

#[test]
fn test_labs_known_value() {
    // s = (+1, +1, -1): C1 = 1 - 1 = 0, C2 = -1, E = 1
    assert_close(labs(&[1, 1, 0]), 4.5, "labs n=3");
}

#[test]
fn test_ising_all_equal_is_optimal() {
    assert_close(ising_ring(&[1; 8]), 8.0, "ring");
    assert_close(ising_ring(&[1, 0, 1, 0]), 0.0, "ring alternating");
    assert_close(ising_torus(&[0; 9]), 18.0, "torus");
    assert_close(ising_triangular(&[1; 9]), 27.0, "triangular");
}

#[test]
fn test_nqueens_scores() {
    // 4x4 solution: queens at (0,1), (1,3), (2,0), (3,2)
    let mut board = vec![0; 16];
    for (r, c) in [(0, 1), (1, 3), (2, 0), (3, 2)] {
        board[r * 4 + c] = 1;
    }
    assert_close(nqueens(&board), 4.0, "valid placement");

    // Two queens on the same row
    let mut clash = vec![0; 16];
    clash[0] = 1;
    clash[1] = 1;
    assert_close(nqueens(&clash), 2.0 - 16.0, "row clash");
}

#[test]
fn test_mis_penalizes_conflicts() {
    let edges = mis_edges(6);
    assert_close(mis(&[1, 0, 1, 0, 0, 0], &edges), 2.0, "independent");
    assert_close(mis(&[1, 1, 0, 0, 0, 0], &edges), 2.0 - 6.0, "adjacent pair");
}

#[test]
fn test_instance_one_reaches_optimum_with_all_ones() {
    for def in FUNCTIONS.iter().filter(|d| ![18, 19, 23].contains(&d.fid)) {
        let mut problem = (def.construct)(1, 16);
        let y = problem.evaluate(&[1; 16]).unwrap();
        assert_eq!(problem.optimum(), Some(y), "{}", def.name);
        assert!(problem.state().optimum_found, "{}", def.name);
    }
}

#[test]
fn test_transformed_instance_keeps_optimum_reachable() {
    let mut problem = super::one_max(12, 20);
    let transform = InstanceTransform::new(1, 12, 20);
    let x = transform.preimage(&[1; 20]);
    problem.evaluate(&x).unwrap();
    assert!(problem.state().optimum_found);
    assert_ne!(problem.optimum(), Some(20.0));
}

#[test]
fn test_nqueens_optimum_is_board_side() {
    assert_eq!(nqueens_problem_optimum(25), Some(5.0));
}

fn nqueens_problem_optimum(dim: usize) -> Option<f64> {
    super::nqueens(1, dim).optimum()
}

#[test]
fn test_table_is_sorted_and_unique() {
    assert!(FUNCTIONS.windows(2).all(|w| w[0].fid < w[1].fid));
    for (i, def) in FUNCTIONS.iter().enumerate() {
        assert_eq!(def.fid as usize, i + 1);
        let p = (def.construct)(1, 9);
        assert_eq!(p.meta().name, def.name);
        assert_eq!(p.meta().fid, def.fid);
        assert_eq!(p.meta().optimization, Optimization::Maximization);
    }
}

#[test]
fn test_zero_dimension_constructs() {
    assert_close(ising_torus(&[]), 0.0, "empty torus");
    assert_close(nqueens(&[]), 0.0, "empty board");
    for def in FUNCTIONS.iter() {
        for iid in [1, 2, 60] {
            let mut p = (def.construct)(iid, 0);
            let y = p.evaluate(&[]).unwrap();
            assert!(y.is_finite(), "{} i{}: {}", def.name, iid, y);
        }
    }
}

proptest! {
    #[test]
    fn prop_epistasis_is_bijective_on_blocks(bits in prop::collection::vec(0i32..=1, 4..=4), other in prop::collection::vec(0i32..=1, 4..=4)) {
        prop_assume!(bits != other);
        prop_assert_ne!(epistasis(&bits, 4), epistasis(&other, 4));
    }

    #[test]
    fn prop_one_max_bounded(bits in prop::collection::vec(0i32..=1, 0..64)) {
        let y = one_max(&bits);
        prop_assert!(y >= 0.0 && y <= bits.len() as f64);
        prop_assert!(leading_ones(&bits) <= y);
    }
}
