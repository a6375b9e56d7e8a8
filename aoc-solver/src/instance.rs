//! A parsed puzzle behind an object-safe interface

use crate::error::{ParseError, SolveError};
use crate::solver::Solver;
use chrono::{TimeDelta, Utc};

/// An answer and the wall-clock time spent computing it
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub elapsed: TimeDelta,
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, TimeDelta) {
    let start = Utc::now();
    let value = f();
    (value, Utc::now() - start)
}

/// Input for one puzzle, parsed up front so every part reuses it
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_time: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parse_time) = timed(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parse_time,
        })
    }
}

/// What the registry hands out: any puzzle, with its data type erased.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(solver: &mut dyn DynSolver) {
///     for part in 1..=solver.parts() {
///         match solver.solve(part) {
///             Ok(result) => println!("{}/{} {}: {} in {}", solver.year(), solver.day(), part, result.answer, result.elapsed),
///             Err(e) => eprintln!("part {}: {}", part, e),
///         }
///     }
/// }
/// ```
pub trait DynSolver {
    /// `PartOutOfRange` unless `part` is in `1..=parts()`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_duration(&self) -> TimeDelta;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;
}

impl<S: Solver> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        if !(1..=S::PARTS).contains(&part) {
            return Err(SolveError::PartOutOfRange(part));
        }
        let (answer, elapsed) = timed(|| S::solve_part(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            elapsed,
        })
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parse_time
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
