//! Error types for the CLI

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error
    #[error("{0}")]
    Executor(#[from] ExecutorError),

    /// Executor thread panicked
    #[error("Executor thread panicked")]
    ExecutorPanicked,
}

/// Executor-specific errors
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ExecutorError>),
}

impl ExecutorError {
    /// Merge two errors into one, flattening nested [`ExecutorError::Multiple`]s
    pub fn combine(first: ExecutorError, second: ExecutorError) -> ExecutorError {
        let errors = match (first, second) {
            (ExecutorError::Multiple(mut v1), ExecutorError::Multiple(v2)) => {
                v1.extend(v2);
                v1
            }
            (first, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v);
                combined
            }
            (ExecutorError::Multiple(mut v), second) => {
                v.push(second);
                v
            }
            (first, second) => vec![first, second],
        };
        ExecutorError::Multiple(errors)
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(existing: Option<ExecutorError>, new: ExecutorError) -> ExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Why a single part has no answer
#[derive(Error, Debug)]
pub enum PartError {
    /// The input could not be loaded
    #[error("{0}")]
    Input(Arc<InputError>),

    /// The solver could not be created, usually because parsing failed
    #[error("{0}")]
    Setup(Arc<aoc_solver::SolverError>),

    #[error("{0}")]
    Solve(#[from] aoc_solver::SolveError),
}

/// Failure to load a puzzle input file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
