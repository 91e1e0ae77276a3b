//! N-Queens on a `k x k` board encoded row-major in `k^2` bits.

use crate::problem::exact_sqrt;

#[inline]
fn excess(count: usize) -> usize {
    count.saturating_sub(1)
}

/// Number of queens minus `n` times the number of surplus queens on any row,
/// column or diagonal. The optimum is `k`.
pub fn nqueens(x: &[i32]) -> f64 {
    let n = x.len();
    if n == 0 {
        return 0.0;
    }
    let k = exact_sqrt(n).unwrap_or(1).max(1);
    let at = |r: usize, c: usize| x[r * k + c] == 1;

    let queens = x.iter().filter(|&&b| b == 1).count();

    let mut violations = 0;
    for i in 0..k {
        violations += excess((0..k).filter(|&c| at(i, c)).count());
        violations += excess((0..k).filter(|&r| at(r, i)).count());
    }

    // Diagonals indexed by r - c + (k - 1) and anti-diagonals by r + c
    for d in 0..(2 * k - 1) {
        let main = (0..k)
            .filter(|&r| {
                let c = r as isize - d as isize + (k as isize - 1);
                (0..k as isize).contains(&c) && at(r, c as usize)
            })
            .count();
        let anti = (0..k)
            .filter(|&r| d >= r && d - r < k && at(r, d - r))
            .count();
        violations += excess(main) + excess(anti);
    }

    queens as f64 - (n * violations) as f64
}
