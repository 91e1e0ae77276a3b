//! # BBOB Suite
//!
//! Twenty-four continuous noiseless functions, minimized over `[-5, 5]^D`:
//!
//! - **1-5**: separable
//! - **6-9**: low or moderate conditioning
//! - **10-14**: high conditioning, unimodal
//! - **15-19**: multi-modal with adequate global structure
//! - **20-24**: multi-modal with weak global structure
//!
//! Each `(fid, iid, dim)` triple seeds its own [`Instance`]: the optimum
//! location `x_opt`, the optimal value `f_opt` and the rotation matrices.

pub mod code;
#[cfg(test)]
pub mod test;

use super::transformation::Rotation;
use super::{Definition, MetaData, Optimization, Problem, RealProblem};
use crate::registry::Suite;
use crate::utils::random::{gaussian, instance_seed, seeded, uniform_vec};

/// Search domain of every BBOB function
pub const BOUNDS: (f64, f64) = (-5.0, 5.0);

/// Seed stride between the rotation matrices of one instance
const ROTATION_STRIDE: u64 = 1_000_003;

/// Seeded data shared by the transformations of one BBOB instance
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub dimension: usize,
    pub xopt: Vec<f64>,
    pub fopt: f64,
    pub seed: u64,
}

impl Instance {
    pub fn new(fid: u32, iid: u32, dimension: usize) -> Self {
        let seed = instance_seed(fid, iid);
        let mut rng = seeded(seed);

        let xopt = uniform_vec(&mut rng, dimension, -4.0, 4.0)
            .into_iter()
            .map(|v| {
                let v = (v * 1e4).round() / 1e4;
                // Keep the optimum off the origin
                if v == 0.0 {
                    -1e-5
                } else {
                    v
                }
            })
            .collect();

        let g1 = gaussian(&mut rng);
        let g2 = gaussian(&mut rng);
        let fopt = if g2 == 0.0 {
            0.0
        } else {
            ((100.0 * 100.0 * g1 / g2).round() / 100.0).clamp(-1000.0, 1000.0)
        };

        Self {
            dimension,
            xopt,
            fopt,
            seed,
        }
    }

    /// The `k`-th rotation matrix of this instance
    pub fn rotation(&self, k: u64) -> Rotation {
        Rotation::random(self.dimension, self.seed + k * ROTATION_STRIDE)
    }
}

fn build(fid: u32, name: &'static str, iid: u32, dimension: usize, raw: fn(&Instance) -> code::RawFn) -> RealProblem {
    let instance = Instance::new(fid, iid, dimension);
    let fopt = instance.fopt;
    let objective = raw(&instance);

    let meta = MetaData {
        suite: Suite::Bbob,
        fid,
        iid,
        name,
        dimension,
        optimization: Optimization::Minimization,
    };

    Problem::new(
        meta,
        BOUNDS,
        Some(fopt),
        Box::new(move |x: &[f64]| -> f64 { objective(x) + fopt }),
    )
}

macro_rules! bbob_functions {
    ($($fid:literal => $ctor:ident, $name:literal, $raw:path;)*) => {
        $(
            pub fn $ctor(iid: u32, dim: usize) -> RealProblem {
                build($fid, $name, iid, dim, $raw)
            }
        )*

        /// The BBOB function table, sorted by fid
        pub static FUNCTIONS: [Definition<f64>; 24] = [
            $(Definition { fid: $fid, name: $name, construct: $ctor },)*
        ];
    };
}

bbob_functions! {
    1 => sphere, "Sphere", code::sphere;
    2 => ellipsoid, "Ellipsoid", code::ellipsoid;
    3 => rastrigin, "Rastrigin", code::rastrigin;
    4 => bueche_rastrigin, "Bueche_Rastrigin", code::bueche_rastrigin;
    5 => linear_slope, "Linear_Slope", code::linear_slope;
    6 => attractive_sector, "AttractiveSector", code::attractive_sector;
    7 => step_ellipsoid, "Step_Ellipsoid", code::step_ellipsoid;
    8 => rosenbrock, "Rosenbrock", code::rosenbrock;
    9 => rosenbrock_rotated, "Rosenbrock_Rotated", code::rosenbrock_rotated;
    10 => ellipsoid_rotated, "Ellipsoid_Rotated", code::ellipsoid_rotated;
    11 => discus, "Discus", code::discus;
    12 => bent_cigar, "Bent_Cigar", code::bent_cigar;
    13 => sharp_ridge, "Sharp_Ridge", code::sharp_ridge;
    14 => different_powers, "Different_Powers", code::different_powers;
    15 => rastrigin_rotated, "Rastrigin_Rotated", code::rastrigin_rotated;
    16 => weierstrass, "Weierstrass", code::weierstrass;
    17 => schaffers10, "Schaffers10", code::schaffers10;
    18 => schaffers1000, "Schaffers1000", code::schaffers1000;
    19 => griewank_rosenbrock, "Griewank_RosenBrock", code::griewank_rosenbrock;
    20 => schwefel, "Schwefel", code::schwefel;
    21 => gallagher101, "Gallagher101", code::gallagher101;
    22 => gallagher21, "Gallagher21", code::gallagher21;
    23 => katsuura, "Katsuura", code::katsuura;
    24 => lunacek_bi_rastrigin, "Lunacek_Bi_Rastrigin", code::lunacek_bi_rastrigin;
}
