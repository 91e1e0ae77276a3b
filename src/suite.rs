//! Benchmark suites: every combination of function, instance and dimension.

use crate::error::{ConfigError, ResolveError};
use crate::problem::Benchmark;
use crate::registry::{get_function, registry, Suite};

/// A set of problems from one suite
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchmarkSuite {
    suite: Suite,
    fids: Vec<u32>,
    iids: Vec<u32>,
    dims: Vec<usize>,
}

impl BenchmarkSuite {
    /// Fails if `suite` is not a supported suite name
    pub fn new(suite: &str, fids: Vec<u32>, iids: Vec<u32>, dims: Vec<usize>) -> Result<Self, ResolveError> {
        Ok(Self {
            suite: suite.parse()?,
            fids,
            iids,
            dims,
        })
    }

    /// Every function of `suite`, instance 1 only
    pub fn full(suite: Suite, dims: Vec<usize>) -> Self {
        Self {
            suite,
            fids: registry().by_suite(suite).iter().map(|e| e.fid).collect(),
            iids: vec![1],
            dims,
        }
    }

    pub fn suite(&self) -> Suite {
        self.suite
    }

    pub fn len(&self) -> usize {
        self.fids.len() * self.iids.len() * self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(fid, iid, dim)` triples, function-major
    pub fn combinations(&self) -> impl Iterator<Item = (u32, u32, usize)> + '_ {
        self.fids.iter().flat_map(move |&fid| {
            self.iids
                .iter()
                .flat_map(move |&iid| self.dims.iter().map(move |&dim| (fid, iid, dim)))
        })
    }

    /// Resolve every combination in turn
    pub fn problems(&self) -> impl Iterator<Item = Result<Benchmark, ResolveError>> + '_ {
        let suite = self.suite.as_str();
        self.combinations()
            .map(move |(fid, iid, dim)| get_function(fid, dim, iid, suite))
    }
}

/// Parse an id list such as `"1-3,5,8-"`.
///
/// Each comma-separated item is a single id, `n-m` (inclusive), `-m` (from
/// `min`) or `n-` (up to `max`). An empty string selects `min..=max`. The
/// result is sorted and free of duplicates.
///
/// ```
/// use iohkit::suite::parse_id_list;
///
/// assert_eq!(parse_id_list("1-3,5", 1, 24).unwrap(), vec![1, 2, 3, 5]);
/// assert_eq!(parse_id_list("22-", 1, 24).unwrap(), vec![22, 23, 24]);
/// assert!(parse_id_list("0-2", 1, 24).is_err());
/// ```
pub fn parse_id_list(input: &str, min: u32, max: u32) -> Result<Vec<u32>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidRange {
        input: input.to_string(),
        reason,
    };
    let number = |s: &str| -> Result<u32, ConfigError> {
        s.trim()
            .parse::<u32>()
            .map_err(|e| invalid(format!("'{}' is not a number: {}", s.trim(), e)))
    };

    if input.trim().is_empty() {
        return Ok((min..=max).collect());
    }

    let mut ids = Vec::new();
    for item in input.split(',').map(str::trim) {
        let (low, high) = match item.split_once('-') {
            None => {
                let id = number(item)?;
                (id, id)
            }
            Some(("", "")) => return Err(invalid("a range needs at least one bound".to_string())),
            Some(("", high)) => (min, number(high)?),
            Some((low, "")) => (number(low)?, max),
            Some((low, high)) => (number(low)?, number(high)?),
        };
        if low > high {
            return Err(invalid(format!("{} is greater than {}", low, high)));
        }
        if low < min || high > max {
            return Err(invalid(format!("ids must lie in {}..={}", min, max)));
        }
        ids.extend(low..=high);
    }

    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Like [`parse_id_list`], but an empty input is an error instead of the
/// whole `min..=max` range
pub fn parse_required_id_list(input: &str, min: u32, max: u32) -> Result<Vec<u32>, ConfigError> {
    if input.trim().is_empty() {
        return Err(ConfigError::InvalidRange {
            input: input.to_string(),
            reason: "the list must not be empty".to_string(),
        });
    }
    parse_id_list(input, min, max)
}
