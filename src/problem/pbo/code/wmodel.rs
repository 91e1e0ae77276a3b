//! W-model layers used to derive PBO functions 4 to 17.
//!
//! Each layer either reshapes the bit string before the base function
//! (dummy variables, neutrality, epistasis) or reshapes the base function's
//! value afterwards (ruggedness).

use crate::utils::random::{permutation, seeded};

/// Seed for the dummy-variable selection, shared by every instance
pub const DUMMY_SEED: u64 = 10_000;

/// Block size of the neutrality layer
pub const NEUTRALITY_MU: usize = 3;

/// Block size of the epistasis layer
pub const EPISTASIS_NU: usize = 4;

/// Sorted positions of the `floor(n * ratio)` variables that count.
pub fn dummy_positions(n: usize, ratio: f64, seed: u64) -> Vec<usize> {
    let keep = (n as f64 * ratio).floor() as usize;
    let mut positions = permutation(&mut seeded(seed), n);
    positions.truncate(keep);
    positions.sort_unstable();
    positions
}

/// Project `x` onto the given positions
pub fn select(x: &[i32], positions: &[usize]) -> Vec<i32> {
    positions.iter().map(|&p| x[p]).collect()
}

/// Majority vote over consecutive blocks of `mu` bits; a trailing partial block is dropped.
pub fn neutrality(x: &[i32], mu: usize) -> Vec<i32> {
    x.chunks_exact(mu)
        .map(|block| {
            let ones = block.iter().filter(|&&b| b == 1).count();
            i32::from(2 * ones >= mu)
        })
        .collect()
}

/// Epistasis over blocks of `nu` bits.
///
/// Output bit `i` of a block is the XOR of every bit in the block except the
/// one at `(i + nu - 1) % nu`. For even `nu` this is a bijection on the block.
/// A trailing partial block is copied unchanged.
pub fn epistasis(x: &[i32], nu: usize) -> Vec<i32> {
    let mut out = Vec::with_capacity(x.len());
    let full = x.len() / nu * nu;

    for block in x[..full].chunks_exact(nu) {
        let parity = block.iter().fold(0, |acc, &b| acc ^ b);
        for i in 0..nu {
            out.push(parity ^ block[(i + nu - 1) % nu]);
        }
    }
    out.extend_from_slice(&x[full..]);
    out
}

/// Ruggedness layer 1: collapses pairs of fitness levels.
pub fn ruggedness1(y: f64, n: usize) -> f64 {
    let nf = n as f64;
    if y == nf {
        (y / 2.0).ceil() + 1.0
    } else if y < nf && n % 2 == 0 {
        (y / 2.0).floor() + 1.0
    } else if y < nf {
        (y / 2.0).ceil() + 1.0
    } else {
        y
    }
}

/// Ruggedness layer 2: swaps neighbouring fitness levels below the optimum.
pub fn ruggedness2(y: f64, n: usize) -> f64 {
    let nf = n as f64;
    if y >= nf {
        return y;
    }
    let y_even = (y as i64) % 2 == 0;
    let n_even = n % 2 == 0;
    if y_even == n_even {
        y + 1.0
    } else {
        (y - 1.0).max(0.0)
    }
}

/// Lookup table for ruggedness layer 3: fitness levels reversed within blocks of five.
pub fn ruggedness3_table(n: usize) -> Vec<f64> {
    let mut table = vec![0.0; n + 1];
    let blocks = n / 5;
    for j in 1..=blocks {
        for k in 0..5 {
            table[n - 5 * j + k] = (n - 5 * j + (4 - k)) as f64;
        }
    }
    let rest = n - blocks * 5;
    for (k, slot) in table.iter_mut().take(rest).enumerate() {
        *slot = (rest - 1 - k) as f64;
    }
    table[n] = n as f64;
    table
}

/// Apply a ruggedness-3 table to a base value
pub fn ruggedness3(y: f64, table: &[f64]) -> f64 {
    table
        .get(y.max(0.0) as usize)
        .copied()
        .unwrap_or(y)
}
