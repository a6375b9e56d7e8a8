//! Two copies of one program joined by a pair of message queues.
//!
//! Scheduling is cooperative and single-threaded: the current program runs
//! until a `rcv` finds its queue empty (or it leaves the program), then
//! control passes to the peer. The run halts when the peer cannot make
//! progress either.

use super::error::DuetError;
use super::instruction::{Dialect, Program};
use super::machine::{Effect, Machine};
use super::registers::{Registers, Word};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Register each program finds its id in
pub const ID_REGISTER: &str = "p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Parked on a `rcv` whose queue was empty
    Blocked,
    /// Counter left the program
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// Both programs are blocked on empty queues
    Deadlock,
    /// A program finished and its peer can make no further progress
    Terminated,
}

#[derive(Debug)]
struct Process {
    machine: Machine,
    inbox: VecDeque<Word>,
    status: Status,
    sent: u64,
    received: u64,
}

impl Process {
    fn new(id: Word) -> Self {
        Self {
            machine: Machine::new(Registers::with(ID_REGISTER, id)),
            inbox: VecDeque::new(),
            status: Status::Running,
            sent: 0,
            received: 0,
        }
    }
}

/// Final state of both programs once the scheduler halted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuetReport {
    pub halt: HaltReason,
    /// Values each program sent
    pub sent: [u64; 2],
    /// Values each program took off its queue
    pub received: [u64; 2],
    /// Values still waiting in each program's queue
    pub pending: [usize; 2],
    pub status: [Status; 2],
    pub registers: [Registers; 2],
}

impl DuetReport {
    pub fn sent_by(&self, id: usize) -> u64 {
        self.sent[id]
    }
}

/// Cooperative scheduler for programs 0 and 1
pub struct Duet<'p> {
    program: &'p Program,
    processes: [Process; 2],
    current: usize,
}

impl<'p> Duet<'p> {
    /// Both programs start at instruction 0 with `p` set to their id; program 0 runs first
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            processes: [Process::new(0), Process::new(1)],
            current: 0,
        }
    }

    pub fn run(mut self) -> Result<DuetReport, DuetError> {
        let program = self.program;
        program.ensure_dialect(Dialect::Duet)?;

        loop {
            let id = self.current;
            let process = &mut self.processes[id];

            let Some(instruction) = process.machine.fetch(program) else {
                debug!(id, pc = process.machine.pc(), "terminated");
                process.status = Status::Terminated;
                if let Some(halt) = self.switch() {
                    return Ok(self.into_report(halt));
                }
                continue;
            };

            match process.machine.execute(instruction)? {
                Effect::Continue => {}
                Effect::Send(value) => {
                    process.sent += 1;
                    trace!(id, value, "send");
                    self.processes[1 - id].inbox.push_back(value);
                }
                Effect::Receive(register) => match process.inbox.pop_front() {
                    Some(value) => {
                        process.machine.receive(register, value)?;
                        process.received += 1;
                        process.status = Status::Running;
                    }
                    None => {
                        debug!(id, pc = process.machine.pc(), "blocked");
                        process.status = Status::Blocked;
                        if let Some(halt) = self.switch() {
                            return Ok(self.into_report(halt));
                        }
                    }
                },
            }
        }
    }

    /// Hand control to the peer, or report why the run is over
    fn switch(&mut self) -> Option<HaltReason> {
        let (from, to) = (self.current, 1 - self.current);
        let peer = &self.processes[to];

        let halt = match peer.status {
            Status::Terminated => Some(HaltReason::Terminated),
            Status::Blocked if peer.inbox.is_empty() => {
                if self.processes[from].status == Status::Blocked {
                    Some(HaltReason::Deadlock)
                } else {
                    Some(HaltReason::Terminated)
                }
            }
            _ => None,
        };

        match halt {
            Some(reason) => debug!(?reason, "halted"),
            None => {
                debug!(from, to, "switch");
                self.current = to;
            }
        }
        halt
    }

    fn into_report(self, halt: HaltReason) -> DuetReport {
        let [first, second] = self.processes;
        DuetReport {
            halt,
            sent: [first.sent, second.sent],
            received: [first.received, second.received],
            pending: [first.inbox.len(), second.inbox.len()],
            status: [first.status, second.status],
            registers: [first.machine.into_registers(), second.machine.into_registers()],
        }
    }
}

/// Run two copies of `program` until they halt; returns the full report
pub fn run_duet(program: &Program) -> Result<DuetReport, DuetError> {
    Duet::new(program).run()
}
