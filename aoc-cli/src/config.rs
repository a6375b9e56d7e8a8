//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use std::path::{Path, PathBuf};

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Input directory, `~` already expanded
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
    pub verbose: u8,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir: expand_tilde(&args.input_dir),
            thread_count: args.threads.unwrap_or_else(num_cpus),
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Expand ~ to home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde(Path::new("~/aoc/inputs")), home.join("aoc/inputs"));
        assert_eq!(expand_tilde(Path::new("~")), home);
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde(Path::new("inputs")), PathBuf::from("inputs"));
        assert_eq!(expand_tilde(Path::new("/tmp/~x")), PathBuf::from("/tmp/~x"));
        assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn from_args_resolves_threads_and_level() {
        let args = Args::try_parse_from(["aoc", "--threads", "3", "-v"]).unwrap();
        let config = Config::from_args(args);
        assert_eq!(config.thread_count, 3);
        assert_eq!(config.log_level(), "info");

        let config = Config::from_args(Args::try_parse_from(["aoc"]).unwrap());
        assert!(config.thread_count >= 1);
        assert_eq!(config.log_level(), "warn");
    }
}
