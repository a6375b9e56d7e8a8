//! Puzzle inputs stored on the local filesystem

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only view over a directory of puzzle inputs
///
/// Directory structure: `{dir}/{year}_day{day:02}.txt`
#[derive(Debug, Clone)]
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path where the input for a year/day is expected
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::NotFound(path),
            _ => InputError::Io { path, source },
        })
    }
}
