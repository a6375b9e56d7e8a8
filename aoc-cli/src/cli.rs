//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs named `{year}_day{day:02}.txt`
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, or day
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.input_dir, PathBuf::from("inputs"));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.tags.is_empty());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn filters_and_repeated_verbose() {
        let args = Args::try_parse_from([
            "aoc",
            "-y",
            "2017",
            "-d",
            "18",
            "--tags",
            "duet,register-machine",
            "--parallelize-by",
            "sequential",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2017));
        assert_eq!(args.day, Some(18));
        assert_eq!(args.tags, ["duet", "register-machine"]);
        assert_eq!(args.parallelize_by, ParallelizeBy::Sequential);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn day_out_of_range_is_rejected() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
    }
}
