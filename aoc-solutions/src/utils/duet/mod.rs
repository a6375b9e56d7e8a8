//! Duet register machine
//!
//! A small interpreter for the register language of 2017 days 18 and 23.
//!
//! # Modes
//!
//! - [`Solo`]: one program; `snd` remembers a value and the first `rcv` with
//!   a non-zero operand halts with it ([`SoloOutcome::Recovered`]). Leaving
//!   the program is a separate outcome ([`SoloOutcome::Exited`]).
//! - [`Duet`]: two copies of the program, `p` = 0 and `p` = 1, exchanging
//!   values through unbounded FIFO queues. A `rcv` on an empty queue blocks
//!   and yields to the peer; the run halts on deadlock or termination.
//! - [`run_coprocessor`]: the `set`/`sub`/`mul`/`jnz` dialect, counting
//!   `mul` executions.
//!
//! Operands are raw tokens resolved on every read: integers are literals,
//! everything else is a register that defaults to zero.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::duet::{Dialect, Program, SoloOutcome, run_duet, run_solo};
//!
//! let program = Program::parse("snd p\nrcv a\nrcv b", Dialect::Duet).unwrap();
//! let report = run_duet(&program).unwrap();
//! assert_eq!(report.sent_by(1), 1);
//!
//! let program = Program::parse("set a 4\nsnd a\nrcv a", Dialect::Duet).unwrap();
//! assert_eq!(run_solo(&program).unwrap(), SoloOutcome::Recovered(4));
//! ```

mod coprocessor;
mod dual;
mod error;
mod instruction;
mod machine;
mod registers;
mod solo;

pub use coprocessor::{CoprocessorReport, run_coprocessor};
pub use dual::{Duet, DuetReport, HaltReason, ID_REGISTER, Status, run_duet};
pub use error::{DecodeError, DuetError};
pub use instruction::{Dialect, Instruction, Opcode, Program};
pub use registers::{Registers, Word};
pub use solo::{Solo, SoloOutcome, run_solo};

#[cfg(test)]
mod tests;
