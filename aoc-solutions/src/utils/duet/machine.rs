use super::error::DuetError;
use super::instruction::{Instruction, Opcode, Program};
use super::registers::{Registers, Word};
use tracing::trace;

/// What the driver has to do after [`Machine::execute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect<'p> {
    /// Fully handled; the counter has moved on
    Continue,
    /// `snd`: a value was produced and the counter advanced
    Send(Word),
    /// `rcv x`: nothing changed, the counter still points at the `rcv`
    Receive(&'p str),
}

/// Program counter plus register bank: the state of one running program.
///
/// Arithmetic and jumps are interpreted here for every mode; `snd` and `rcv`
/// are handed back as an [`Effect`] so each driver applies its own rule.
#[derive(Debug, Clone, Default)]
pub(crate) struct Machine {
    registers: Registers,
    pc: i64,
}

impl Machine {
    pub(crate) fn new(registers: Registers) -> Self {
        Self { registers, pc: 0 }
    }

    pub(crate) fn pc(&self) -> i64 {
        self.pc
    }

    pub(crate) fn registers(&self) -> &Registers {
        &self.registers
    }

    pub(crate) fn into_registers(self) -> Registers {
        self.registers
    }

    /// Instruction under the counter, `None` once the program has been left
    pub(crate) fn fetch<'p>(&self, program: &'p Program) -> Option<&'p Instruction> {
        program.fetch(self.pc)
    }

    pub(crate) fn advance(&mut self) {
        self.pc += 1;
    }

    /// Complete a pending `rcv` by storing `value` and moving past it
    pub(crate) fn receive(&mut self, register: &str, value: Word) -> Result<(), DuetError> {
        self.registers.set(register, value)?;
        self.advance();
        Ok(())
    }

    pub(crate) fn execute<'p>(&mut self, instruction: &'p Instruction) -> Result<Effect<'p>, DuetError> {
        trace!(pc = self.pc, %instruction, "execute");

        let (x, y) = (instruction.x(), instruction.y());
        let regs = &mut self.registers;
        match instruction.opcode() {
            Opcode::Snd => {
                let value = regs.get(x);
                self.advance();
                return Ok(Effect::Send(value));
            }
            Opcode::Rcv => return Ok(Effect::Receive(x)),
            Opcode::Set => {
                let value = regs.get(y);
                regs.set(x, value)?;
            }
            Opcode::Add => {
                let value = i128::from(regs.get(x)) + i128::from(regs.get(y));
                regs.set(x, value)?;
            }
            Opcode::Sub => {
                let value = i128::from(regs.get(x)) - i128::from(regs.get(y));
                regs.set(x, value)?;
            }
            Opcode::Mul => {
                let value = i128::from(regs.get(x)) * i128::from(regs.get(y));
                regs.set(x, value)?;
            }
            Opcode::Mod => {
                let divisor = regs.get(y);
                if divisor == 0 {
                    return Err(DuetError::ModuloByZero { pc: self.pc as usize });
                }
                let value = floored_mod(regs.get(x), divisor);
                regs.set(x, value)?;
            }
            Opcode::Jgz => {
                if regs.get(x) > 0 {
                    self.jump(y);
                    return Ok(Effect::Continue);
                }
            }
            Opcode::Jnz => {
                if regs.get(x) != 0 {
                    self.jump(y);
                    return Ok(Effect::Continue);
                }
            }
        }

        self.advance();
        Ok(Effect::Continue)
    }

    fn jump(&mut self, offset: &str) {
        // Saturating: a wild offset just lands outside the program
        self.pc = self.pc.saturating_add(self.registers.get(offset));
    }
}

/// Modulo whose result takes the sign of the divisor (`-7 mod 5 == 3`)
pub(crate) fn floored_mod(value: Word, divisor: Word) -> i128 {
    let (value, divisor) = (i128::from(value), i128::from(divisor));
    let remainder = value % divisor;
    if remainder != 0 && (remainder < 0) != (divisor < 0) {
        remainder + divisor
    } else {
        remainder
    }
}
