//! # PBO Suite
//!
//! Twenty-three pseudo-Boolean functions, maximized over `{0, 1}^D`:
//!
//! - **1-3**: OneMax, LeadingOnes, Linear
//! - **4-17**: OneMax and LeadingOnes composed with the W-model layers
//!   (dummy variables, neutrality, epistasis, ruggedness)
//! - **18-23**: LABS, MIS, Ising (ring, torus, triangular), N-Queens
//!
//! Ising_Torus (21) and NQueens (23) lay their variables on a square grid, so
//! their dimension must be a perfect square.

pub mod code;
#[cfg(test)]
pub mod test;

use code::wmodel::{
    dummy_positions, epistasis, neutrality, ruggedness1, ruggedness2, ruggedness3,
    ruggedness3_table, select, DUMMY_SEED, EPISTASIS_NU, NEUTRALITY_MU,
};

use super::transformation::InstanceTransform;
use super::{exact_sqrt, Definition, IntegerProblem, MetaData, Optimization, Problem};
use crate::registry::Suite;

/// How the optimal raw value of a function is known
enum Optimum {
    /// The all-ones string is optimal
    AllOnes,
    Known(f64),
    Unknown,
}

fn build<F>(fid: u32, name: &'static str, iid: u32, dimension: usize, optimum: Optimum, raw: F) -> IntegerProblem
where
    F: Fn(&[i32]) -> f64 + Send + Sync + 'static,
{
    let transform = InstanceTransform::new(fid, iid, dimension);
    let optimum = match optimum {
        Optimum::AllOnes => Some(transform.objective(raw(&vec![1; dimension]))),
        Optimum::Known(y) => Some(transform.objective(y)),
        Optimum::Unknown => None,
    };

    let meta = MetaData {
        suite: Suite::Pbo,
        fid,
        iid,
        name,
        dimension,
        optimization: Optimization::Maximization,
    };

    Problem::new(
        meta,
        (0, 1),
        optimum,
        Box::new(move |x: &[i32]| transform.objective(raw(&transform.variables(x)))),
    )
}

pub fn one_max(iid: u32, dim: usize) -> IntegerProblem {
    build(1, "OneMax", iid, dim, Optimum::AllOnes, code::one_max)
}

pub fn leading_ones(iid: u32, dim: usize) -> IntegerProblem {
    build(2, "LeadingOnes", iid, dim, Optimum::AllOnes, code::leading_ones)
}

pub fn linear(iid: u32, dim: usize) -> IntegerProblem {
    build(3, "Linear", iid, dim, Optimum::AllOnes, code::linear)
}

pub fn one_max_dummy1(iid: u32, dim: usize) -> IntegerProblem {
    let positions = dummy_positions(dim, 0.5, DUMMY_SEED);
    build(4, "OneMax_Dummy1", iid, dim, Optimum::AllOnes, move |x| {
        code::one_max(&select(x, &positions))
    })
}

pub fn one_max_dummy2(iid: u32, dim: usize) -> IntegerProblem {
    let positions = dummy_positions(dim, 0.9, DUMMY_SEED);
    build(5, "OneMax_Dummy2", iid, dim, Optimum::AllOnes, move |x| {
        code::one_max(&select(x, &positions))
    })
}

pub fn one_max_neutrality(iid: u32, dim: usize) -> IntegerProblem {
    build(6, "OneMax_Neutrality", iid, dim, Optimum::AllOnes, |x| {
        code::one_max(&neutrality(x, NEUTRALITY_MU))
    })
}

pub fn one_max_epistasis(iid: u32, dim: usize) -> IntegerProblem {
    build(7, "OneMax_Epistasis", iid, dim, Optimum::AllOnes, |x| {
        code::one_max(&epistasis(x, EPISTASIS_NU))
    })
}

pub fn one_max_ruggedness1(iid: u32, dim: usize) -> IntegerProblem {
    build(8, "OneMax_Ruggedness1", iid, dim, Optimum::AllOnes, |x| {
        ruggedness1(code::one_max(x), x.len())
    })
}

pub fn one_max_ruggedness2(iid: u32, dim: usize) -> IntegerProblem {
    build(9, "OneMax_Ruggedness2", iid, dim, Optimum::AllOnes, |x| {
        ruggedness2(code::one_max(x), x.len())
    })
}

pub fn one_max_ruggedness3(iid: u32, dim: usize) -> IntegerProblem {
    let table = ruggedness3_table(dim);
    build(10, "OneMax_Ruggedness3", iid, dim, Optimum::AllOnes, move |x| {
        ruggedness3(code::one_max(x), &table)
    })
}

pub fn leading_ones_dummy1(iid: u32, dim: usize) -> IntegerProblem {
    let positions = dummy_positions(dim, 0.5, DUMMY_SEED);
    build(11, "LeadingOnes_Dummy1", iid, dim, Optimum::AllOnes, move |x| {
        code::leading_ones(&select(x, &positions))
    })
}

pub fn leading_ones_dummy2(iid: u32, dim: usize) -> IntegerProblem {
    let positions = dummy_positions(dim, 0.9, DUMMY_SEED);
    build(12, "LeadingOnes_Dummy2", iid, dim, Optimum::AllOnes, move |x| {
        code::leading_ones(&select(x, &positions))
    })
}

pub fn leading_ones_neutrality(iid: u32, dim: usize) -> IntegerProblem {
    build(13, "LeadingOnes_Neutrality", iid, dim, Optimum::AllOnes, |x| {
        code::leading_ones(&neutrality(x, NEUTRALITY_MU))
    })
}

pub fn leading_ones_epistasis(iid: u32, dim: usize) -> IntegerProblem {
    build(14, "LeadingOnes_Epistasis", iid, dim, Optimum::AllOnes, |x| {
        code::leading_ones(&epistasis(x, EPISTASIS_NU))
    })
}

pub fn leading_ones_ruggedness1(iid: u32, dim: usize) -> IntegerProblem {
    build(15, "LeadingOnes_Ruggedness1", iid, dim, Optimum::AllOnes, |x| {
        ruggedness1(code::leading_ones(x), x.len())
    })
}

pub fn leading_ones_ruggedness2(iid: u32, dim: usize) -> IntegerProblem {
    build(16, "LeadingOnes_Ruggedness2", iid, dim, Optimum::AllOnes, |x| {
        ruggedness2(code::leading_ones(x), x.len())
    })
}

pub fn leading_ones_ruggedness3(iid: u32, dim: usize) -> IntegerProblem {
    let table = ruggedness3_table(dim);
    build(17, "LeadingOnes_Ruggedness3", iid, dim, Optimum::AllOnes, move |x| {
        ruggedness3(code::leading_ones(x), &table)
    })
}

pub fn labs(iid: u32, dim: usize) -> IntegerProblem {
    build(18, "LABS", iid, dim, Optimum::Unknown, code::labs)
}

pub fn mis(iid: u32, dim: usize) -> IntegerProblem {
    let edges = code::mis_edges(dim);
    build(19, "MIS", iid, dim, Optimum::Unknown, move |x| code::mis(x, &edges))
}

pub fn ising_ring(iid: u32, dim: usize) -> IntegerProblem {
    build(20, "Ising_Ring", iid, dim, Optimum::AllOnes, code::ising_ring)
}

pub fn ising_torus(iid: u32, dim: usize) -> IntegerProblem {
    build(21, "Ising_Torus", iid, dim, Optimum::AllOnes, code::ising_torus)
}

pub fn ising_triangular(iid: u32, dim: usize) -> IntegerProblem {
    build(22, "Ising_Triangular", iid, dim, Optimum::AllOnes, code::ising_triangular)
}

pub fn nqueens(iid: u32, dim: usize) -> IntegerProblem {
    let optimum = exact_sqrt(dim).map_or(Optimum::Unknown, |k| Optimum::Known(k as f64));
    build(23, "NQueens", iid, dim, optimum, code::nqueens)
}

/// The PBO function table, sorted by fid
pub static FUNCTIONS: [Definition<i32>; 23] = [
    Definition { fid: 1, name: "OneMax", construct: one_max },
    Definition { fid: 2, name: "LeadingOnes", construct: leading_ones },
    Definition { fid: 3, name: "Linear", construct: linear },
    Definition { fid: 4, name: "OneMax_Dummy1", construct: one_max_dummy1 },
    Definition { fid: 5, name: "OneMax_Dummy2", construct: one_max_dummy2 },
    Definition { fid: 6, name: "OneMax_Neutrality", construct: one_max_neutrality },
    Definition { fid: 7, name: "OneMax_Epistasis", construct: one_max_epistasis },
    Definition { fid: 8, name: "OneMax_Ruggedness1", construct: one_max_ruggedness1 },
    Definition { fid: 9, name: "OneMax_Ruggedness2", construct: one_max_ruggedness2 },
    Definition { fid: 10, name: "OneMax_Ruggedness3", construct: one_max_ruggedness3 },
    Definition { fid: 11, name: "LeadingOnes_Dummy1", construct: leading_ones_dummy1 },
    Definition { fid: 12, name: "LeadingOnes_Dummy2", construct: leading_ones_dummy2 },
    Definition { fid: 13, name: "LeadingOnes_Neutrality", construct: leading_ones_neutrality },
    Definition { fid: 14, name: "LeadingOnes_Epistasis", construct: leading_ones_epistasis },
    Definition { fid: 15, name: "LeadingOnes_Ruggedness1", construct: leading_ones_ruggedness1 },
    Definition { fid: 16, name: "LeadingOnes_Ruggedness2", construct: leading_ones_ruggedness2 },
    Definition { fid: 17, name: "LeadingOnes_Ruggedness3", construct: leading_ones_ruggedness3 },
    Definition { fid: 18, name: "LABS", construct: labs },
    Definition { fid: 19, name: "MIS", construct: mis },
    Definition { fid: 20, name: "Ising_Ring", construct: ising_ring },
    Definition { fid: 21, name: "Ising_Torus", construct: ising_torus },
    Definition { fid: 22, name: "Ising_Triangular", construct: ising_triangular },
    Definition { fid: 23, name: "NQueens", construct: nqueens },
];
