//! Traits a puzzle implements to be driven by the registry

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle text into whatever the parts work on.
///
/// `SharedData` carries a lifetime so parsed data may keep slices of the
/// input instead of copying them:
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Listing;
///
/// impl AocParser for Listing {
///     type SharedData<'a> = Vec<Vec<&'a str>>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         let rows: Vec<Vec<&str>> = input
///             .lines()
///             .map(|line| line.split_whitespace().collect())
///             .filter(|tokens: &Vec<&str>| !tokens.is_empty())
///             .collect();
///         if rows.is_empty() {
///             return Err(ParseError::MissingData("empty listing".into()));
///         }
///         Ok(rows)
///     }
/// }
///
/// let rows = Listing::parse("set a 1\n\nsnd a").unwrap();
/// assert_eq!(rows, [vec!["set", "a", "1"], vec!["snd", "a"]]);
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// One part of a puzzle, selected at compile time by `N`.
///
/// `#[derive(AocSolver)]` turns a set of these into a [`Solver`].
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime dispatch from a part number to its answer.
///
/// Callers going through [`DynSolver`](crate::DynSolver) never reach
/// `solve_part` with a part outside `1..=PARTS`.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Opcodes;
///
/// impl AocParser for Opcodes {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().filter_map(|l| l.split_whitespace().next()).collect())
///     }
/// }
///
/// impl Solver for Opcodes {
///     const PARTS: u8 = 1;
///
///     fn solve_part(opcodes: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(opcodes.iter().filter(|op| **op == "mul").count().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut opcodes = Opcodes::parse("mul a 2\nsub b 1\nmul b b").unwrap();
/// assert_eq!(Opcodes::solve_part(&mut opcodes, 1).unwrap(), "2");
/// ```
pub trait Solver: AocParser {
    const PARTS: u8;

    /// `PartNotImplemented` for a part with no solution yet, `SolveFailed`
    /// when the input cannot be solved
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}
