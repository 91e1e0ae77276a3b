//! # iohkit
//!
//! Benchmark-function resolution and parallel experiment dispatch for the
//! BBOB (continuous) and PBO (pseudo-Boolean) suites.
//!
//! - [`registry::get_function`] turns a suite name and a numeric or symbolic
//!   function id into a constructed problem
//! - [`parallel::run_parallel`] runs a callable over many argument tuples on a
//!   sequential, thread-pool, timeout-pool, job-queue or master/worker backend

pub mod error;
pub mod experiment;
pub mod logger;
pub mod parallel;
pub mod problem;
pub mod registry;
pub mod suite;
pub mod utils;

/// Re-export tui from utils for the binary
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::error::{ConfigError, DispatchError, ExperimentError, ProblemError, ResolveError};
    pub use crate::experiment::{random_search, Experiment, ExperimentConfig, RunSummary};
    pub use crate::parallel::{run_parallel, Backend, Dispatch, ParallelConfig};
    pub use crate::problem::{Benchmark, IntegerProblem, Optimization, RealProblem};
    pub use crate::registry::{get_function, registry, FunctionId, Suite};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_all_functions_registry_verify() {
        let registry = registry();
        let functions = registry.all();

        println!("Verifying {} functions...", functions.len());

        for entry in functions {
            let dim = if entry.requires_square { 9 } else { 8 };
            let mut problem = get_function(entry.fid, dim, 1, entry.suite.as_str())
                .unwrap_or_else(|e| panic!("  ❌ '{}' failed to resolve: {}", entry.name, e));

            let y = match &mut problem {
                Benchmark::Real(p) => p.evaluate(&vec![0.5; dim]),
                Benchmark::Integer(p) => p.evaluate(&vec![1; dim]),
            };
            match y {
                Ok(y) if y.is_finite() => println!("  ✅ '{}' evaluated to {}", entry.name, y),
                Ok(y) => panic!("  ❌ '{}' evaluated to {}", entry.name, y),
                Err(e) => panic!("  ❌ '{}' failed to evaluate: {}", entry.name, e),
            }
            assert_eq!(problem.state().evaluations, 1);
        }
    }

    #[test]
    fn test_known_optima_at_instance_one() {
        let mut one_max = get_function("OneMax", 12, 1, "PBO").unwrap();
        one_max.as_integer_mut().unwrap().evaluate(&[1; 12]).unwrap();
        assert!(one_max.state().optimum_found);

        let mut leading_ones = get_function("LeadingOnes", 12, 1, "PBO").unwrap();
        leading_ones.as_integer_mut().unwrap().evaluate(&[1; 12]).unwrap();
        assert!(leading_ones.state().optimum_found);

        let inst = crate::problem::bbob::Instance::new(1, 1, 5);
        let mut sphere = get_function("Sphere", 5, 1, "BBOB").unwrap();
        sphere.as_real_mut().unwrap().evaluate(&inst.xopt).unwrap();
        assert!(sphere.state().optimum_found);
    }

    #[test]
    fn test_instances_are_deterministic() {
        for iid in [1u32, 2, 50, 51, 100] {
            let mut a = get_function(7u32, 10, iid, "PBO").unwrap().into_integer().unwrap();
            let mut b = get_function(7u32, 10, iid, "PBO").unwrap().into_integer().unwrap();
            let x = [1, 0, 1, 1, 0, 0, 1, 0, 1, 1];
            assert_eq!(a.evaluate(&x).unwrap(), b.evaluate(&x).unwrap());
            assert_eq!(a.optimum(), b.optimum());
        }
    }
}
