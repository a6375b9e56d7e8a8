use super::error::{DecodeError, DuetError};
use super::instruction::{Dialect, Opcode, Program};
use super::machine::{Effect, Machine};
use super::registers::Registers;
use tracing::debug;

/// Result of running a program to completion in coprocessor mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoprocessorReport {
    /// How many `mul` instructions executed
    pub multiplications: u64,
    pub registers: Registers,
}

/// Run `program` on `registers` until the counter leaves it, counting `mul`s.
///
/// Only the coprocessor opcodes may appear; anything else is reported as an
/// unsupported opcode on its source line before a single instruction runs.
pub fn run_coprocessor(program: &Program, registers: Registers) -> Result<CoprocessorReport, DuetError> {
    program.ensure_dialect(Dialect::Coprocessor)?;

    let mut machine = Machine::new(registers);
    let mut multiplications = 0;

    while let Some(instruction) = machine.fetch(program) {
        let pc = machine.pc();
        if instruction.opcode() == Opcode::Mul {
            multiplications += 1;
        }
        match machine.execute(instruction)? {
            Effect::Continue => {}
            Effect::Send(_) | Effect::Receive(_) => {
                return Err(DuetError::MalformedInstruction {
                    line: program.line(pc as usize).unwrap_or_default(),
                    source: DecodeError::UnsupportedOpcode(instruction.opcode().to_string()),
                });
            }
        }
    }

    debug!(multiplications, "coprocessor exited");
    Ok(CoprocessorReport {
        multiplications,
        registers: machine.into_registers(),
    })
}
