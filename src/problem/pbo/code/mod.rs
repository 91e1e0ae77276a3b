//! Raw pseudo-Boolean objective functions.
//!
//! These operate on untransformed bit strings; instance transformations are
//! applied by the constructors in the parent module.

mod base;
mod graph;
mod labs;
mod nqueens;
pub mod wmodel;

pub use base::{leading_ones, linear, one_max};
pub use graph::{ising_ring, ising_torus, ising_triangular, mis, mis_edges};
pub use labs::labs;
pub use nqueens::nqueens;

/// Type alias for a raw PBO function signature
pub type RawFn = fn(&[i32]) -> f64;
