//! Puts results arriving from worker threads back into (year, day, part) order
//!
//! Results are released as soon as every key before them has been seen, so
//! output streams while slower solvers are still running.

use crate::executor::{SolverResult, WorkItem};
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    /// Keys not yet released, in output order
    expected: VecDeque<ResultKey>,
    /// Results that arrived ahead of their turn
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(mut expected_keys: Vec<ResultKey>) -> Self {
        expected_keys.sort_unstable();
        Self {
            expected: expected_keys.into(),
            pending: BTreeMap::new(),
        }
    }

    /// One key per part of every work item
    pub fn for_work(work_items: &[WorkItem]) -> Self {
        Self::new(
            work_items
                .iter()
                .flat_map(|w| {
                    w.parts.clone().map(move |part| ResultKey {
                        year: w.year,
                        day: w.day,
                        part,
                    })
                })
                .collect(),
        )
    }

    /// Add a result and return every result now ready for output, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front() {
            let Some(result) = self.pending.remove(next) else {
                break;
            };
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Whatever is still buffered, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
