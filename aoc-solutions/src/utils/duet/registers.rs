use super::error::DuetError;
use std::collections::BTreeMap;
use std::fmt;

/// Machine word held by every register
pub type Word = i64;

/// Named integer registers that read as zero until written.
///
/// Operands are resolved through [`Registers::get`] at every use: a token
/// that parses as an integer is a literal, anything else names a register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    store: BTreeMap<String, Word>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank with one register preset, as used to hand each program its id
    pub fn with(name: &str, value: Word) -> Self {
        let mut registers = Self::new();
        registers.store.insert(name.to_owned(), value);
        registers
    }

    /// Value of an operand token: the literal itself, or the register's value
    pub fn get(&self, token: &str) -> Word {
        match token.parse::<Word>() {
            Ok(literal) => literal,
            Err(_) => self.store.get(token).copied().unwrap_or(0),
        }
    }

    /// Store `value` in register `name`.
    ///
    /// Accepts any integer that converts into a [`Word`]; wider values that
    /// do not fit are rejected instead of being truncated.
    pub fn set<V>(&mut self, name: &str, value: V) -> Result<(), DuetError>
    where
        V: TryInto<Word> + Copy + fmt::Display,
    {
        let word = value
            .try_into()
            .map_err(|_| DuetError::InvalidRegisterValue {
                register: name.to_owned(),
                value: value.to_string(),
            })?;

        match self.store.get_mut(name) {
            Some(slot) => *slot = word,
            None => {
                self.store.insert(name.to_owned(), word);
            }
        }
        Ok(())
    }

    /// Registers written so far, in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Word)> + '_ {
        self.store.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
