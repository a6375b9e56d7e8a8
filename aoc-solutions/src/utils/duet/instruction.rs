use super::error::{DecodeError, DuetError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Snd,
    Set,
    Add,
    Sub,
    Mul,
    Mod,
    Rcv,
    Jgz,
    Jnz,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Snd => "snd",
            Opcode::Set => "set",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Mod => "mod",
            Opcode::Rcv => "rcv",
            Opcode::Jgz => "jgz",
            Opcode::Jnz => "jnz",
        }
    }

    /// Number of operands the opcode takes
    pub fn arity(self) -> usize {
        match self {
            Opcode::Snd | Opcode::Rcv => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Instruction set a program is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `snd set add mul mod rcv jgz`
    #[default]
    Duet,
    /// `set sub mul jnz`
    Coprocessor,
}

impl Dialect {
    pub fn opcodes(self) -> &'static [Opcode] {
        match self {
            Dialect::Duet => &[
                Opcode::Snd,
                Opcode::Set,
                Opcode::Add,
                Opcode::Mul,
                Opcode::Mod,
                Opcode::Rcv,
                Opcode::Jgz,
            ],
            Dialect::Coprocessor => &[Opcode::Set, Opcode::Sub, Opcode::Mul, Opcode::Jnz],
        }
    }

    pub fn opcode(self, mnemonic: &str) -> Option<Opcode> {
        self.opcodes()
            .iter()
            .copied()
            .find(|op| op.mnemonic() == mnemonic)
    }

    pub fn contains(self, opcode: Opcode) -> bool {
        self.opcodes().contains(&opcode)
    }
}

/// One decoded instruction.
///
/// Operands stay raw tokens; whether a token is a literal or a register is
/// decided each time it is read, see [`Registers::get`](super::Registers::get).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    x: Box<str>,
    y: Option<Box<str>>,
}

impl Instruction {
    /// Decode one whitespace-delimited line
    pub fn decode(line: &str, dialect: Dialect) -> Result<Self, DecodeError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        Self::from_tokens(&tokens, dialect)
    }

    /// Decode an already split line; the first token is the opcode
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], dialect: Dialect) -> Result<Self, DecodeError> {
        let (head, operands) = tokens.split_first().ok_or(DecodeError::EmptyInstruction)?;
        let head = head.as_ref();
        let opcode = dialect
            .opcode(head)
            .ok_or_else(|| DecodeError::UnsupportedOpcode(head.to_owned()))?;

        if operands.len() != opcode.arity() {
            return Err(DecodeError::OperandCount {
                opcode,
                expected: opcode.arity(),
                found: operands.len(),
            });
        }

        let mut operands = operands.iter().map(|t| Box::<str>::from(t.as_ref()));
        let x = operands.next().ok_or(DecodeError::EmptyInstruction)?;
        Ok(Self {
            opcode,
            x,
            y: operands.next(),
        })
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// First operand
    pub fn x(&self) -> &str {
        &self.x
    }

    /// Second operand; `""` for single-operand opcodes, which never read it
    pub fn y(&self) -> &str {
        self.y.as_deref().unwrap_or_default()
    }

    /// The instruction as tokens, opcode first
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens = vec![self.opcode.mnemonic(), &*self.x];
        tokens.extend(self.y.as_deref());
        tokens
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.opcode, self.x)?;
        if let Some(y) = &self.y {
            write!(f, " {}", y)?;
        }
        Ok(())
    }
}

/// Decoded instruction list, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    dialect: Dialect,
    instructions: Vec<Instruction>,
    /// 1-based source line of each instruction; blank lines are skipped
    lines: Vec<usize>,
}

impl Program {
    /// Decode every non-blank line, failing on the first bad one
    pub fn parse(source: &str, dialect: Dialect) -> Result<Self, DuetError> {
        let (lines, instructions) = source
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                Instruction::decode(line, dialect)
                    .map(|instruction| (idx + 1, instruction))
                    .map_err(|source| DuetError::MalformedInstruction {
                        line: idx + 1,
                        source,
                    })
            })
            .collect::<Result<(Vec<_>, Vec<_>), _>>()?;

        Ok(Self {
            dialect,
            instructions,
            lines,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Source line the instruction at `index` was decoded from
    pub fn line(&self, index: usize) -> Option<usize> {
        self.lines.get(index).copied()
    }

    /// Fail on the first instruction `dialect` has no opcode for.
    ///
    /// A program decoded under one dialect may still be handed to the
    /// executor of the other, so every executor checks before it runs.
    pub fn ensure_dialect(&self, dialect: Dialect) -> Result<(), DuetError> {
        match self
            .instructions
            .iter()
            .zip(&self.lines)
            .find(|(instruction, _)| !dialect.contains(instruction.opcode()))
        {
            Some((instruction, &line)) => Err(DuetError::MalformedInstruction {
                line,
                source: DecodeError::UnsupportedOpcode(instruction.opcode().mnemonic().to_owned()),
            }),
            None => Ok(()),
        }
    }

    /// Instruction at a signed program counter, `None` once it has left the program
    pub fn fetch(&self, pc: i64) -> Option<&Instruction> {
        usize::try_from(pc).ok().and_then(|i| self.instructions.get(i))
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in self.iter() {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}
