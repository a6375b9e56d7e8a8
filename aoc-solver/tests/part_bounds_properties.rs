//! Part numbers outside `1..=PARTS` never reach `solve_part`

use aoc_solver::{AocParser, DynSolver, ParseError, SolveError, Solver, SolverInstance};
use proptest::prelude::*;

struct Echo<const N: u8>;

impl<const N: u8> AocParser for Echo<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for Echo<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        if part == 0 || part > N {
            panic!("solve_part called with part {}", part);
        }
        Ok(format!("part{}", part))
    }
}

fn instance(parts: u8) -> Box<dyn DynSolver> {
    match parts {
        1 => Box::new(SolverInstance::<Echo<1>>::new(2017, 18, "").unwrap()),
        2 => Box::new(SolverInstance::<Echo<2>>::new(2017, 18, "").unwrap()),
        _ => Box::new(SolverInstance::<Echo<3>>::new(2017, 18, "").unwrap()),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_out_of_range_rejection(parts in 1u8..=3, part in 0u8..=255) {
        let mut solver = instance(parts);
        prop_assert_eq!(solver.parts(), parts);

        match solver.solve(part) {
            Ok(result) => {
                prop_assert!((1..=parts).contains(&part));
                prop_assert_eq!(result.answer, format!("part{}", part));
            }
            Err(SolveError::PartOutOfRange(p)) => {
                prop_assert!(part == 0 || part > parts);
                prop_assert_eq!(p, part);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

#[test]
fn test_part_zero_rejected() {
    assert!(matches!(instance(2).solve(0), Err(SolveError::PartOutOfRange(0))));
}

#[test]
fn test_valid_part_delegates() {
    let result = instance(1).solve(1).unwrap();
    assert_eq!(result.answer, "part1");
    assert!(result.elapsed >= chrono::TimeDelta::zero());
}
