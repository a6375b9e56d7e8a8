use crate::utils::duet::{Dialect, Program, run_duet, run_solo};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

/// Duet: one program recovering a sound, then two programs exchanging values
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 18, tags = ["duet", "register-machine"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Program;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Program::parse(input, Dialect::Duet).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run_solo(program)
            .map(|outcome| outcome.value().to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(program: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run_duet(program)
            .map(|report| report.sent_by(1).to_string())
            .map_err(SolveError::failed)
    }
}
