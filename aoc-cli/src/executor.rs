//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ExecutorError, PartError};
use crate::inputs::InputStore;
use aoc_solver::SolverRegistry;
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, PartError>,
    /// Only set on the first part of a day, the one that paid for parsing
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: PartError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Everything a worker thread needs, shared by reference across the pool
struct ExecutionContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: ExecutionContext,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: ExecutionContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.context;
        ctx.registry
            .iter_info()
            .filter(|info| ctx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| ctx.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on the part filter and the solver's part count
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.context.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ExecutorError> {
        let work_items = self.collect_work_items();
        let ctx = &self.context;

        match ctx.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .filter_map(|work| run_work(work, &tx, ctx).err())
                .reduce(ExecutorError::combine)
                .map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            ParallelizeBy::Day => self.execute_parallel(work_items, &tx),
        }
    }

    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ExecutorError> {
        let ctx = &self.context;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .filter_map(|work| run_work(&work, tx, ctx).err())
                .reduce_with(ExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }

    /// Years run in parallel, days within a year in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ExecutorError> {
        let ctx = &self.context;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .filter_map(|items| {
                    items.iter().fold(None, |err, work| match run_work(work, tx, ctx) {
                        Ok(()) => err,
                        Err(e) => Some(ExecutorError::combine_opt(err, e)),
                    })
                })
                .reduce_with(ExecutorError::combine)
                .map_or(Ok(()), Err)
        })
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ExecutorError> {
    tx.send(result).map_err(|_| ExecutorError::ChannelSend)
}

/// Report the same failure for every requested part
fn send_failures(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: impl Fn() -> PartError,
) -> Result<(), ExecutorError> {
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error()))?;
    }
    Ok(())
}

/// Load the input, parse once, then solve each part in order
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match ctx.inputs.read(year, day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year, day, error = %e, "skipping solver");
            let e = Arc::new(e);
            return send_failures(work, tx, || PartError::Input(Arc::clone(&e)));
        }
    };

    let mut solver = match ctx.registry.create_solver(year, day, &input) {
        Ok(solver) => solver,
        Err(e) => {
            warn!(year, day, error = %e, "solver setup failed");
            let e = Arc::new(e);
            return send_failures(work, tx, || PartError::Setup(Arc::clone(&e)));
        }
    };

    let parse_duration = solver.parse_duration();
    debug!(year, day, ?parse_duration, "parsed");

    for part in work.parts.clone() {
        let result = match solver.solve(part) {
            Ok(solved) => SolverResult {
                year,
                day,
                part,
                solve_duration: solved.elapsed,
                answer: Ok(solved.answer),
                parse_duration: (part == *work.parts.start()).then_some(parse_duration),
            },
            Err(e) => SolverResult::failed(year, day, part, e.into()),
        };
        send(tx, result)?;
    }
    Ok(())
}
