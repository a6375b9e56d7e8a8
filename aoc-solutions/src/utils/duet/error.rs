//! Error types for the register machine

use super::instruction::Opcode;
use thiserror::Error;

/// Why a single instruction line could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty instruction")]
    EmptyInstruction,
    #[error("unsupported opcode `{0}`")]
    UnsupportedOpcode(String),
    #[error("`{opcode}` takes {expected} operand(s), found {found}")]
    OperandCount {
        opcode: Opcode,
        expected: usize,
        found: usize,
    },
}

/// Failures raised while loading or running a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuetError {
    /// Decoding failed; nothing has been executed
    #[error("malformed instruction on line {line}: {source}")]
    MalformedInstruction {
        line: usize,
        #[source]
        source: DecodeError,
    },
    /// A value that does not fit a register was about to be stored
    #[error("cannot store {value} in register `{register}`")]
    InvalidRegisterValue { register: String, value: String },
    #[error("modulo by zero at instruction {pc}")]
    ModuloByZero { pc: usize },
}
