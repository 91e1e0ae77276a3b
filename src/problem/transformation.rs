//! Instance transformations.
//!
//! Instance 1 of every function is the untransformed landscape. Higher instance
//! ids derive a seeded transformation from `(fid, iid)`:
//!
//! - PBO, iid 2..=50: variables XOR-ed with a random mask
//! - PBO, iid 51..=100 (and above): variables permuted
//! - PBO, iid > 1: objective scaled as `a * f(x) + b`
//! - BBOB: rotations drawn as random orthogonal matrices ([`Rotation`])

use rand::Rng;

use crate::utils::random::{bit_vec, gaussian, instance_seed, permutation, seeded};

/// Last instance id using the XOR mask, later ids permute instead
pub const LAST_XOR_INSTANCE: u32 = 50;

/// Seeded transformation applied to a pseudo-Boolean problem
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceTransform {
    xor_mask: Option<Vec<i32>>,
    permutation: Option<Vec<usize>>,
    scale: f64,
    offset: f64,
}

impl InstanceTransform {
    pub fn identity() -> Self {
        Self {
            xor_mask: None,
            permutation: None,
            scale: 1.0,
            offset: 0.0,
        }
    }

    pub fn new(fid: u32, iid: u32, dimension: usize) -> Self {
        if iid <= 1 {
            return Self::identity();
        }

        let mut rng = seeded(instance_seed(fid, iid));
        let (xor_mask, permutation) = if iid <= LAST_XOR_INSTANCE {
            (Some(bit_vec(&mut rng, dimension)), None)
        } else {
            (None, Some(permutation(&mut rng, dimension)))
        };
        let scale = rng.random_range(0.2..=5.0);
        let offset = rng.random_range(-1000.0..=1000.0);

        Self {
            xor_mask,
            permutation,
            scale,
            offset,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.xor_mask.is_none() && self.permutation.is_none() && self.scale == 1.0 && self.offset == 0.0
    }

    /// Map the caller's bit string into the raw function's coordinates
    pub fn variables(&self, x: &[i32]) -> Vec<i32> {
        match (&self.xor_mask, &self.permutation) {
            (Some(mask), _) => x.iter().zip(mask).map(|(&b, &m)| b ^ m).collect(),
            (None, Some(perm)) => perm.iter().map(|&p| x[p]).collect(),
            (None, None) => x.to_vec(),
        }
    }

    /// Map a raw objective value into the instance's objective value
    pub fn objective(&self, y: f64) -> f64 {
        self.scale * y + self.offset
    }

    /// Caller-side bit string that maps onto `raw` after [`Self::variables`]
    pub fn preimage(&self, raw: &[i32]) -> Vec<i32> {
        match (&self.xor_mask, &self.permutation) {
            (Some(mask), _) => raw.iter().zip(mask).map(|(&b, &m)| b ^ m).collect(),
            (None, Some(perm)) => {
                let mut x = vec![0; raw.len()];
                for (i, &p) in perm.iter().enumerate() {
                    x[p] = raw[i];
                }
                x
            }
            (None, None) => raw.to_vec(),
        }
    }
}

/// Random orthogonal matrix, row-major
#[derive(Clone, Debug, PartialEq)]
pub struct Rotation {
    rows: Vec<Vec<f64>>,
}

impl Rotation {
    pub fn identity(dimension: usize) -> Self {
        let rows = (0..dimension)
            .map(|i| (0..dimension).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self { rows }
    }

    /// Gram-Schmidt orthonormalization of a seeded Gaussian matrix
    pub fn random(dimension: usize, seed: u64) -> Self {
        let mut rng = seeded(seed);
        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(dimension);

        while rows.len() < dimension {
            let mut v: Vec<f64> = (0..dimension).map(|_| gaussian(&mut rng)).collect();
            for r in &rows {
                let proj: f64 = v.iter().zip(r).map(|(a, b)| a * b).sum();
                for (vi, ri) in v.iter_mut().zip(r) {
                    *vi -= proj * ri;
                }
            }
            let norm = v.iter().map(|a| a * a).sum::<f64>().sqrt();
            // Degenerate draw, sample again
            if norm < 1e-10 {
                continue;
            }
            v.iter_mut().for_each(|a| *a /= norm);
            rows.push(v);
        }

        Self { rows }
    }

    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    /// `R x`
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.iter().zip(x).map(|(a, b)| a * b).sum())
            .collect()
    }

    /// `R^T x`
    pub fn apply_transposed(&self, x: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.rows.len()];
        for (row, &xi) in self.rows.iter().zip(x) {
            for (o, &r) in out.iter_mut().zip(row) {
                *o += r * xi;
            }
        }
        out
    }
}
