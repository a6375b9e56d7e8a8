use crate::utils::duet::{Dialect, Program, Registers, run_coprocessor};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Coprocessor Conflagration, part 1 only: count executed `mul`s
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2017, day = 23, tags = ["coprocessor", "register-machine"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Program;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Program::parse(input, Dialect::Coprocessor)
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let report = run_coprocessor(program, Registers::new()).map_err(SolveError::failed)?;
        Ok(report.multiplications.to_string())
    }
}
