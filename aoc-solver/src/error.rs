//! Error types for the solver library

use thiserror::Error;

/// Error type for parsing input data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input format doesn't match expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
}

/// Error type for solving a specific part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The requested part has no `PartSolver` implementation
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The requested part number is out of range (0 or above `PARTS`)
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// An error occurred while solving the part
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any error raised while computing an answer
    pub fn failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SolveError::SolveFailed(Box::new(error))
    }
}

/// Error type for solver operations
#[derive(Debug, Error)]
pub enum SolverError {
    /// Solver not found for the given year and day
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// Year or day outside the supported range
    #[error("Invalid year {0} or day {1}")]
    InvalidYearDay(u16, u8),
    /// Error occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    /// Error occurred during solving
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Attempted to register a solver for a year-day combination that already exists
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    /// Year or day outside the supported range
    #[error("Cannot register year {0} day {1}: out of range")]
    InvalidYearDay(u16, u8),
}
