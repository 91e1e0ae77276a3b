//! Graph-structured pseudo-Boolean functions: maximum independent set and
//! the Ising model on ring, torus and triangular lattices.

use crate::problem::exact_sqrt;

/// Edges of the MIS graph: a path over all vertices plus rungs joining
/// vertex `i` with `i + n/2` in the first half.
pub fn mis_edges(n: usize) -> Vec<(usize, usize)> {
    let half = n / 2;
    let mut edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
    edges.extend((0..half).map(|i| (i, i + half)).filter(|&(a, b)| b != a + 1));
    edges
}

/// Size of the selected vertex set minus `n` for every edge with both ends selected.
pub fn mis(x: &[i32], edges: &[(usize, usize)]) -> f64 {
    let n = x.len() as f64;
    let selected = x.iter().filter(|&&b| b == 1).count() as f64;
    let conflicts = edges
        .iter()
        .filter(|&&(a, b)| x[a] == 1 && x[b] == 1)
        .count() as f64;
    selected - n * conflicts
}

#[inline]
fn agree(a: i32, b: i32) -> f64 {
    if a == b {
        1.0
    } else {
        0.0
    }
}

/// Number of agreeing neighbours on a ring.
pub fn ising_ring(x: &[i32]) -> f64 {
    let n = x.len();
    (0..n).map(|i| agree(x[i], x[(i + n - 1) % n])).sum()
}

/// Number of agreeing neighbours on a periodic square lattice.
///
/// The dimension is assumed to be a perfect square; the resolver enforces it.
pub fn ising_torus(x: &[i32]) -> f64 {
    let n = x.len();
    if n == 0 {
        return 0.0;
    }
    let side = exact_sqrt(n).unwrap_or(1).max(1);
    let mut result = 0.0;
    for row in 0..side {
        for col in 0..side {
            let here = x[row * side + col];
            let right = x[row * side + (col + 1) % side];
            let down = x[((row + 1) % side) * side + col];
            result += agree(here, right) + agree(here, down);
        }
    }
    result
}

/// Number of agreeing neighbours on a periodic triangular lattice.
///
/// Sites are laid out row-major with row width `floor(sqrt(n))`; each site is
/// compared with its right, lower and lower-right neighbour, wrapping around `n`.
pub fn ising_triangular(x: &[i32]) -> f64 {
    let n = x.len();
    let side = ((n as f64).sqrt().floor() as usize).max(1);
    (0..n)
        .map(|i| {
            agree(x[i], x[(i + 1) % n])
                + agree(x[i], x[(i + side) % n])
                + agree(x[i], x[(i + side + 1) % n])
        })
        .sum()
}
