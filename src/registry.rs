//! Function registry and resolver.
//!
//! Maps a suite name plus a numeric or symbolic function identifier to the
//! constructor of a benchmark problem, so experiments can be described with
//! plain configuration values instead of hard-coded constructors.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::ResolveError;
use crate::problem::{bbob, is_perfect_square, pbo, Benchmark, Definition, IntegerProblem, RealProblem};

/// A benchmark suite
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suite {
    Bbob,
    Pbo,
}

impl Suite {
    pub const ALL: [Suite; 2] = [Suite::Bbob, Suite::Pbo];

    pub fn as_str(self) -> &'static str {
        match self {
            Suite::Bbob => "BBOB",
            Suite::Pbo => "PBO",
        }
    }
}

impl FromStr for Suite {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BBOB" => Ok(Suite::Bbob),
            "PBO" => Ok(Suite::Pbo),
            other => Err(ResolveError::UnsupportedSuite(other.to_string())),
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric id or exact class name of a function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionId<'a> {
    Index(u32),
    Name(&'a str),
}

impl From<u32> for FunctionId<'_> {
    fn from(fid: u32) -> Self {
        FunctionId::Index(fid)
    }
}

impl<'a> From<&'a str> for FunctionId<'a> {
    fn from(name: &'a str) -> Self {
        FunctionId::Name(name)
    }
}

impl fmt::Display for FunctionId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionId::Index(fid) => write!(f, "{}", fid),
            FunctionId::Name(name) => f.write_str(name),
        }
    }
}

/// Constructor of a problem from `(iid, dimension)`
#[derive(Clone, Copy)]
pub enum Factory {
    Integer(fn(u32, usize) -> IntegerProblem),
    Real(fn(u32, usize) -> RealProblem),
}

impl Factory {
    pub fn build(self, iid: u32, dimension: usize) -> Benchmark {
        match self {
            Factory::Integer(construct) => Benchmark::Integer(construct(iid, dimension)),
            Factory::Real(construct) => Benchmark::Real(construct(iid, dimension)),
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::Integer(_) => f.write_str("Factory::Integer"),
            Factory::Real(_) => f.write_str("Factory::Real"),
        }
    }
}

/// One row of a suite table
#[derive(Clone, Copy, Debug)]
pub struct FunctionEntry {
    pub fid: u32,
    pub name: &'static str,
    pub suite: Suite,
    /// Variables live on a square grid
    pub requires_square: bool,
    pub construct: Factory,
}

impl FunctionEntry {
    /// Check `dimension` against the function's constraints
    pub fn validate(&self, dimension: usize) -> Result<(), ResolveError> {
        if dimension == 0 {
            return Err(ResolveError::zero_dimension(self.name));
        }
        if self.requires_square && !is_perfect_square(dimension) {
            return Err(ResolveError::not_square(self.name, dimension));
        }
        Ok(())
    }

    pub fn build(&self, iid: u32, dimension: usize) -> Result<Benchmark, ResolveError> {
        self.validate(dimension)?;
        Ok(self.construct.build(iid, dimension))
    }
}

/// PBO functions laid out on a square grid
const SQUARE_PBO: [u32; 2] = [21, 23];

/// Alternative names accepted by the name path
const ALIASES: [(Suite, &str, &str); 1] = [(Suite::Pbo, "Ising_2D", "Ising_Torus")];

/// Global table of every known function, grouped by suite and sorted by fid
pub struct FunctionRegistry {
    entries: Vec<FunctionEntry>,
}

impl FunctionRegistry {
    fn build() -> Self {
        let integer = pbo::FUNCTIONS.iter().map(|d: &Definition<i32>| FunctionEntry {
            fid: d.fid,
            name: d.name,
            suite: Suite::Pbo,
            requires_square: SQUARE_PBO.contains(&d.fid),
            construct: Factory::Integer(d.construct),
        });
        let real = bbob::FUNCTIONS.iter().map(|d: &Definition<f64>| FunctionEntry {
            fid: d.fid,
            name: d.name,
            suite: Suite::Bbob,
            requires_square: false,
            construct: Factory::Real(d.construct),
        });

        let mut entries: Vec<FunctionEntry> = real.chain(integer).collect();
        entries.sort_by_key(|e| (e.suite, e.fid));
        Self { entries }
    }

    /// Get all registered functions
    pub fn all(&self) -> &[FunctionEntry] {
        &self.entries
    }

    /// Find a function by suite and fid
    pub fn find(&self, suite: Suite, fid: u32) -> Option<&FunctionEntry> {
        let entries = self.by_suite(suite);
        entries
            .binary_search_by_key(&fid, |e| e.fid)
            .ok()
            .map(|i| &entries[i])
    }

    /// Find a function by exact name (or alias) within a suite
    pub fn find_by_name(&self, suite: Suite, name: &str) -> Option<&FunctionEntry> {
        let name = ALIASES
            .iter()
            .find(|(s, alias, _)| *s == suite && *alias == name)
            .map_or(name, |(_, _, target)| *target);
        self.by_suite(suite).iter().find(|e| e.name == name)
    }

    /// All functions of one suite, sorted by fid
    pub fn by_suite(&self, suite: Suite) -> &[FunctionEntry] {
        let start = self.entries.partition_point(|e| e.suite < suite);
        let end = self.entries.partition_point(|e| e.suite <= suite);
        &self.entries[start..end]
    }

    /// List function names of one suite
    pub fn list_names(&self, suite: Suite) -> Vec<&'static str> {
        self.by_suite(suite).iter().map(|e| e.name).collect()
    }
}

static REGISTRY: Lazy<FunctionRegistry> = Lazy::new(FunctionRegistry::build);

/// The global function registry
pub fn registry() -> &'static FunctionRegistry {
    &REGISTRY
}

/// Resolve and construct a benchmark function.
///
/// `suite` must be `"BBOB"` or `"PBO"`. `fid` is either the numeric id within
/// the suite or the exact function name (`"OneMax"`, `"Ising_2D"`, ...).
///
/// # Errors
///
/// - [`ResolveError::UnsupportedSuite`] for any other suite name
/// - [`ResolveError::UnknownFunction`] / [`ResolveError::UnknownName`] when
///   the suite has no such function
/// - [`ResolveError::InvalidDimension`] for a zero dimension, or a
///   non-square dimension on a grid-based function
///
/// ```
/// use iohkit::registry::get_function;
///
/// let problem = get_function(1u32, 16, 1, "PBO").unwrap();
/// assert_eq!(problem.meta().name, "OneMax");
/// assert!(get_function("NQueens", 10, 1, "PBO").is_err());
/// ```
pub fn get_function<'a>(
    fid: impl Into<FunctionId<'a>>,
    dim: usize,
    iid: u32,
    suite: &str,
) -> Result<Benchmark, ResolveError> {
    let suite: Suite = suite.parse()?;
    let entry = match fid.into() {
        FunctionId::Index(fid) => registry().find(suite, fid).ok_or(ResolveError::UnknownFunction {
            suite: suite.to_string(),
            fid,
        })?,
        FunctionId::Name(name) => {
            registry()
                .find_by_name(suite, name)
                .ok_or_else(|| ResolveError::UnknownName {
                    suite: suite.to_string(),
                    name: name.to_string(),
                })?
        }
    };
    entry.build(iid, dim)
}
