//! Platform and demand file reader.
//!
//! Platform file: a header `N R C` (platform count, range limit, passenger
//! capacity) followed by `N` records `index x y` with indices `1..=N` in
//! order. The depot sits at the origin. Demand file: `N` records
//! `index demand`.
//!
//! Both files are read as whitespace-separated tokens, so records may be
//! split or joined across lines. Text after `#` on a line is ignored. Errors
//! report the line of the offending token.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{FlightPlanError, Result};
use crate::models::{FlightProblem, Platform, MAX_PLATFORMS};

/// Contents of a platform file.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformFile {
    /// Depot at index 0, then platforms `1..=N` with zero demand.
    pub platforms: Vec<Platform>,
    /// Range limit `R` from the header.
    pub range: f64,
    /// Passenger capacity `C` from the header.
    pub capacity: u32,
}

/// Whitespace tokenizer that remembers line numbers.
struct Tokens<R> {
    reader: R,
    buffer: Vec<String>,
    line: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line: 0,
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.buffer.is_empty() {
            let mut text = String::new();
            if self.reader.read_line(&mut text)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let content = text.split('#').next().unwrap_or("");
            self.buffer = content.split_whitespace().rev().map(String::from).collect();
        }
        Ok(self.buffer.pop())
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next_token()?.ok_or_else(|| FlightPlanError::Parse {
            line: self.line + 1,
            message: format!("unexpected end of input, expected {what}"),
        })?;
        token.parse().map_err(|_| FlightPlanError::Parse {
            line: self.line,
            message: format!("invalid {what} '{token}'"),
        })
    }

    fn expect_index(&mut self, expected: usize) -> Result<()> {
        let index: usize = self.parse("index")?;
        if index != expected {
            return Err(FlightPlanError::Parse {
                line: self.line,
                message: format!("expected index {expected}, found {index}"),
            });
        }
        Ok(())
    }
}

/// Reads a platform file.
///
/// # Examples
///
/// ```
/// use u_flightplan::io::read_platforms;
///
/// let text = "2 200 23\n1 10.0 0.0\n2 0.0 15.5\n";
/// let file = read_platforms(text.as_bytes()).unwrap();
/// assert_eq!(file.platforms.len(), 3);
/// assert_eq!(file.capacity, 23);
/// assert_eq!(file.range, 200.0);
/// ```
pub fn read_platforms<R: BufRead>(reader: R) -> Result<PlatformFile> {
    let mut tokens = Tokens::new(reader);

    let n: usize = tokens.parse("platform count")?;
    let range: f64 = tokens.parse("range limit")?;
    let capacity: u32 = tokens.parse("capacity")?;
    if n == 0 {
        return Err(FlightPlanError::NoPlatforms);
    }
    if n + 1 > MAX_PLATFORMS {
        return Err(FlightPlanError::TooManyPlatforms {
            count: n,
            max: MAX_PLATFORMS - 1,
        });
    }
    if !(range.is_finite() && range > 0.0) {
        return Err(FlightPlanError::InvalidRange(range));
    }
    if capacity == 0 {
        return Err(FlightPlanError::InvalidCapacity);
    }

    let mut platforms = Vec::with_capacity(n + 1);
    platforms.push(Platform::depot());
    for i in 1..=n {
        tokens.expect_index(i)?;
        let x: f64 = tokens.parse("x coordinate")?;
        let y: f64 = tokens.parse("y coordinate")?;
        platforms.push(Platform::new(i, x, y, 0));
    }

    Ok(PlatformFile {
        platforms,
        range,
        capacity,
    })
}

/// Reads `n` demand records.
///
/// # Examples
///
/// ```
/// use u_flightplan::io::read_demands;
///
/// let demands = read_demands("1 4\n2 0\n".as_bytes(), 2).unwrap();
/// assert_eq!(demands, vec![4, 0]);
/// ```
pub fn read_demands<R: BufRead>(reader: R, n: usize) -> Result<Vec<u32>> {
    let mut tokens = Tokens::new(reader);
    let mut demands = Vec::with_capacity(n);
    for i in 1..=n {
        tokens.expect_index(i)?;
        demands.push(tokens.parse("demand")?);
    }
    Ok(demands)
}

/// Builds a problem from platform and demand readers.
pub fn read_problem<P: BufRead, D: BufRead>(platforms: P, demands: D) -> Result<FlightProblem> {
    let file = read_platforms(platforms)?;
    let n = file.platforms.len() - 1;
    let demands = read_demands(demands, n)?;

    let platforms = file
        .platforms
        .into_iter()
        .map(|p| {
            let demand = if p.id() == 0 { 0 } else { demands[p.id() - 1] };
            p.with_demand(demand)
        })
        .collect();
    FlightProblem::new(platforms, file.capacity, file.range)
}

/// Loads a problem from a platform file and a demand file.
pub fn load_problem(
    platform_path: impl AsRef<Path>,
    demand_path: impl AsRef<Path>,
) -> Result<FlightProblem> {
    let platforms = BufReader::new(File::open(platform_path.as_ref())?);
    let demands = BufReader::new(File::open(demand_path.as_ref())?);
    let problem = read_problem(platforms, demands)?;
    info!(
        platforms = problem.num_platforms(),
        total_demand = problem.total_demand(),
        capacity = problem.capacity(),
        range = problem.range(),
        "loaded problem"
    );
    Ok(problem)
}
