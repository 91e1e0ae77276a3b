//! # Benchmark Problems
//!
//! A [`Problem`] couples the metadata of a benchmark function (suite, function
//! id, instance id, dimension, optimization direction) with its objective and
//! the state of the current run: number of evaluations, last and best-so-far
//! values, and whether the known optimum has been hit.
//!
//! Two input domains exist:
//!
//! - **BBOB**: continuous functions over `[-5, 5]^D`, minimized ([`RealProblem`])
//! - **PBO**: pseudo-Boolean functions over `{0, 1}^D`, maximized ([`IntegerProblem`])
//!
//! The resolver in [`crate::registry`] returns either kind wrapped in a [`Benchmark`].

pub mod bbob;
pub mod pbo;
pub mod transformation;

use std::fmt;

use crate::error::ProblemError;
use crate::registry::Suite;

/// Tolerance used to decide whether the optimum has been reached
pub const OPTIMUM_TOLERANCE: f64 = 1e-8;

/// Direction of optimization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Optimization {
    Minimization,
    Maximization,
}

impl Optimization {
    /// Returns true if `a` is strictly better than `b`
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Optimization::Minimization => a < b,
            Optimization::Maximization => a > b,
        }
    }

    /// The worst possible objective value
    pub fn worst(self) -> f64 {
        match self {
            Optimization::Minimization => f64::INFINITY,
            Optimization::Maximization => f64::NEG_INFINITY,
        }
    }
}

impl fmt::Display for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optimization::Minimization => write!(f, "min"),
            Optimization::Maximization => write!(f, "max"),
        }
    }
}

/// Static description of a constructed problem
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaData {
    pub suite: Suite,
    pub fid: u32,
    pub iid: u32,
    pub name: &'static str,
    pub dimension: usize,
    pub optimization: Optimization,
}

/// Evaluation state of the current run
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub evaluations: usize,
    pub current_y: f64,
    pub best_y: f64,
    /// Evaluation at which `best_y` was first reached
    pub best_evaluation: usize,
    pub optimum_found: bool,
}

impl State {
    fn new(optimization: Optimization) -> Self {
        Self {
            evaluations: 0,
            current_y: optimization.worst(),
            best_y: optimization.worst(),
            best_evaluation: 0,
            optimum_found: false,
        }
    }

    /// Returns true if `y` improved on the best-so-far value
    fn record(&mut self, y: f64, optimization: Optimization, optimum: Option<f64>) -> bool {
        self.evaluations += 1;
        self.current_y = y;

        let improved = optimization.is_better(y, self.best_y);
        if improved {
            self.best_y = y;
            self.best_evaluation = self.evaluations;
        }
        if let Some(target) = optimum {
            if (y - target).abs() <= OPTIMUM_TOLERANCE || optimization.is_better(y, target) {
                self.optimum_found = true;
            }
        }
        improved
    }
}

/// Boxed objective function, including any instance transformation
pub type Objective<T> = Box<dyn Fn(&[T]) -> f64 + Send + Sync>;

/// A constructed benchmark problem
pub struct Problem<T> {
    meta: MetaData,
    state: State,
    bounds: (T, T),
    optimum: Option<f64>,
    objective: Objective<T>,
}

/// Entry of a suite's function table
pub struct Definition<T: 'static> {
    pub fid: u32,
    pub name: &'static str,
    /// Builds the problem from `(iid, dimension)`
    pub construct: fn(u32, usize) -> Problem<T>,
}

/// Continuous (BBOB) problem
pub type RealProblem = Problem<f64>;

/// Pseudo-Boolean (PBO) problem
pub type IntegerProblem = Problem<i32>;

impl<T: Copy> Problem<T> {
    pub fn new(meta: MetaData, bounds: (T, T), optimum: Option<f64>, objective: Objective<T>) -> Self {
        let state = State::new(meta.optimization);
        Self {
            meta,
            state,
            bounds,
            optimum,
            objective,
        }
    }

    /// Evaluate `x` and update the run state.
    pub fn evaluate(&mut self, x: &[T]) -> Result<f64, ProblemError> {
        if x.len() != self.meta.dimension {
            return Err(ProblemError::DimensionMismatch {
                expected: self.meta.dimension,
                got: x.len(),
            });
        }

        let y = (self.objective)(x);
        self.state.record(y, self.meta.optimization, self.optimum);
        Ok(y)
    }

    /// Evaluate `x` and report whether it improved the best-so-far value.
    pub fn evaluate_tracked(&mut self, x: &[T]) -> Result<(f64, bool), ProblemError> {
        let before = self.state.best_y;
        let y = self.evaluate(x)?;
        Ok((y, self.meta.optimization.is_better(y, before)))
    }

    /// Reset the run state before an independent run
    pub fn reset(&mut self) {
        self.state = State::new(self.meta.optimization);
    }

    pub fn meta(&self) -> &MetaData {
        &self.meta
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Known optimal objective value, if any
    pub fn optimum(&self) -> Option<f64> {
        self.optimum
    }

    /// Lower and upper bound of every variable
    pub fn bounds(&self) -> (T, T) {
        self.bounds
    }
}

impl<T: fmt::Debug> fmt::Debug for Problem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("meta", &self.meta)
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("optimum", &self.optimum)
            .finish_non_exhaustive()
    }
}

/// A problem of either input domain, as returned by the resolver
#[derive(Debug)]
pub enum Benchmark {
    Real(RealProblem),
    Integer(IntegerProblem),
}

impl Benchmark {
    pub fn meta(&self) -> &MetaData {
        match self {
            Benchmark::Real(p) => p.meta(),
            Benchmark::Integer(p) => p.meta(),
        }
    }

    pub fn state(&self) -> &State {
        match self {
            Benchmark::Real(p) => p.state(),
            Benchmark::Integer(p) => p.state(),
        }
    }

    pub fn optimum(&self) -> Option<f64> {
        match self {
            Benchmark::Real(p) => p.optimum(),
            Benchmark::Integer(p) => p.optimum(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Benchmark::Real(p) => p.reset(),
            Benchmark::Integer(p) => p.reset(),
        }
    }

    pub fn as_real_mut(&mut self) -> Option<&mut RealProblem> {
        match self {
            Benchmark::Real(p) => Some(p),
            Benchmark::Integer(_) => None,
        }
    }

    pub fn as_integer_mut(&mut self) -> Option<&mut IntegerProblem> {
        match self {
            Benchmark::Integer(p) => Some(p),
            Benchmark::Real(_) => None,
        }
    }

    pub fn into_real(self) -> Option<RealProblem> {
        match self {
            Benchmark::Real(p) => Some(p),
            Benchmark::Integer(_) => None,
        }
    }

    pub fn into_integer(self) -> Option<IntegerProblem> {
        match self {
            Benchmark::Integer(p) => Some(p),
            Benchmark::Real(_) => None,
        }
    }
}

impl From<RealProblem> for Benchmark {
    fn from(p: RealProblem) -> Self {
        Benchmark::Real(p)
    }
}

impl From<IntegerProblem> for Benchmark {
    fn from(p: IntegerProblem) -> Self {
        Benchmark::Integer(p)
    }
}

/// Integer square root, if `n` is a perfect square
pub fn exact_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    [root.saturating_sub(1), root, root + 1]
        .into_iter()
        .find(|r| r * r == n)
}

pub fn is_perfect_square(n: usize) -> bool {
    exact_sqrt(n).is_some()
}
