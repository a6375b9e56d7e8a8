use super::error::DuetError;
use super::instruction::{Dialect, Program};
use super::machine::{Effect, Machine};
use super::registers::{Registers, Word};
use tracing::debug;

/// How a single-program run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoloOutcome {
    /// `rcv` saw a non-zero operand; carries the most recent `snd` value (0 if none)
    Recovered(Word),
    /// The program counter left the program
    Exited,
}

impl SoloOutcome {
    /// Scalar answer: the recovered value, or 0 when the program exited
    pub fn value(self) -> Word {
        match self {
            SoloOutcome::Recovered(value) => value,
            SoloOutcome::Exited => 0,
        }
    }
}

/// Runs one program where `snd` records a value and a non-zero `rcv` halts
pub struct Solo<'p> {
    program: &'p Program,
    machine: Machine,
    last_sent: Word,
}

impl<'p> Solo<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self::with_registers(program, Registers::new())
    }

    pub fn with_registers(program: &'p Program, registers: Registers) -> Self {
        Self {
            program,
            machine: Machine::new(registers),
            last_sent: 0,
        }
    }

    /// Fails up front if the program uses an opcode outside the duet set
    pub fn run(&mut self) -> Result<SoloOutcome, DuetError> {
        self.program.ensure_dialect(Dialect::Duet)?;

        while let Some(instruction) = self.machine.fetch(self.program) {
            match self.machine.execute(instruction)? {
                Effect::Continue => {}
                Effect::Send(value) => self.last_sent = value,
                Effect::Receive(operand) => {
                    if self.machine.registers().get(operand) != 0 {
                        debug!(pc = self.machine.pc(), value = self.last_sent, "recovered");
                        return Ok(SoloOutcome::Recovered(self.last_sent));
                    }
                    self.machine.advance();
                }
            }
        }

        debug!(pc = self.machine.pc(), "exited");
        Ok(SoloOutcome::Exited)
    }

    pub fn registers(&self) -> &Registers {
        self.machine.registers()
    }
}

/// Run `program` on a fresh register bank
pub fn run_solo(program: &Program) -> Result<SoloOutcome, DuetError> {
    Solo::new(program).run()
}
