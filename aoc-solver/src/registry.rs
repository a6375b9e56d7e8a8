//! Solver registry: (year, day) → factory that parses input into a solver

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years addressable by the registry (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Flat slot index for a year/day, `None` when out of bounds
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if !(BASE_YEAR..BASE_YEAR + MAX_YEARS as u16).contains(&year) {
        return None;
    }
    if day == 0 || day as usize > DAYS_PER_YEAR {
        return None;
    }
    Some((year - BASE_YEAR) as usize * DAYS_PER_YEAR + (day - 1) as usize)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

/// Thread-safe factory creating a parsed solver from raw input
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
    tags: &'static [&'static str],
}

/// Builder for an immutable [`SolverRegistry`]
///
/// # Example
///
/// ```no_run
/// # use aoc_solver::SolverRegistryBuilder;
/// let registry = SolverRegistryBuilder::new()
///     .register_all_plugins()
///     .unwrap()
///     .build();
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register solver type `S` for a year and day
    pub fn register<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_tagged::<S>(year, day, &[])
    }

    fn register_tagged<S>(
        self,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, tags, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    /// Register a raw factory with an explicit parts count
    ///
    /// Fails if the year/day is out of bounds or already taken.
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        tags: &'static [&'static str],
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        self.entries[index] = Some(FactoryEntry {
            factory: Box::new(factory),
            parts,
            tags,
        });
        Ok(self)
    }

    /// Register every plugin submitted through `inventory`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins accepted by `filter`
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2017)
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin
                    .solver
                    .register_with(self, plugin.year, plugin.day, plugin.tags)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable lookup from (year, day) to solver factories
pub struct SolverRegistry {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistry {
    /// Metadata for every registered solver, ordered by year then day
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        self.entry(year, day).map(|e| FactoryInfo {
            year,
            day,
            parts: e.parts,
        })
    }

    /// Tags attached to a registered solver
    pub fn tags(&self, year: u16, day: u8) -> &'static [&'static str] {
        self.entry(year, day).map(|e| e.tags).unwrap_or(&[])
    }

    fn entry(&self, year: u16, day: u8) -> Option<&FactoryEntry> {
        self.entries.get(calc_index(year, day)?)?.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Parse `input` with the solver registered for year/day
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;
        let entry = self
            .entries
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

/// Object-safe registration hook, blanket-implemented for every [`Solver`]
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<SolverRegistryBuilder, RegistrationError>;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register_tagged::<S>(year, day, tags)
    }
}

/// A solver submitted for automatic registration
///
/// Normally emitted by `#[derive(AutoRegisterSolver)]`.
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used by the CLI `--tags` filter
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);
