//! Advent of Code Solver Library
//!
//! Trait-based framework for puzzle solvers keyed by year and day. A solver
//! parses its input once into shared data, then answers each part from it.
//!
//! # Overview
//!
//! - [`AocParser`] turns raw input into `SharedData`
//! - [`PartSolver<N>`] answers part `N`
//! - [`Solver`] dispatches a runtime part number; `#[derive(AocSolver)]`
//!   writes it for you from the `PartSolver` impls
//! - [`SolverRegistry`] maps (year, day) to factories, populated by hand or
//!   from plugins submitted with `#[derive(AutoRegisterSolver)]`
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 1)]
//! struct Sum;
//!
//! impl AocParser for Sum {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sum {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Sum>(2017, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2017, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver};

// Re-exported for the code generated by `AutoRegisterSolver`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
