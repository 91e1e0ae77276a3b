//! Seeded randomness for reproducible problem instances.
//!
//! Every instance-dependent quantity (optimum location, rotations, masks,
//! permutations) is drawn from a generator seeded with [`instance_seed`], so
//! the same `(fid, iid, dim)` always yields the same landscape.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Seed derived from a function id and an instance id
pub fn instance_seed(fid: u32, iid: u32) -> u64 {
    fid as u64 + 10_000 * iid as u64
}

/// Create a generator from a fixed seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}

/// Standard normal sample
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// `n` uniform samples in `[low, high)`
pub fn uniform_vec<R: Rng + ?Sized>(rng: &mut R, n: usize, low: f64, high: f64) -> Vec<f64> {
    (0..n).map(|_| rng.random_range(low..high)).collect()
}

/// `n` uniform bits as 0/1 integers
pub fn bit_vec<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<i32> {
    (0..n).map(|_| i32::from(rng.random_bool(0.5))).collect()
}

/// Random permutation of `0..n`
pub fn permutation<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}
