//! Utility modules for sizing worker pools, seeding instances and CLI output.

pub mod cpu;
pub mod random;
pub mod tui;

// Re-export commonly used items
pub use cpu::{available_cores, worker_count};
pub use random::{instance_seed, seeded, time_seed};
