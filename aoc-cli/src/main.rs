//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::ResultAggregator;
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use output::OutputFormatter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::from_args(Args::parse());
    init_logging(&config);

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the `-v` count
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: Config) -> Result<(), CliError> {
    let registry = build_registry(&config.tags)?;
    info!(solvers = registry.len(), "registry built");

    let executor = Executor::new(registry, &config)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    for work in &work_items {
        if !executor.inputs().contains(work.year, work.day) {
            warn!(
                path = %executor.inputs().path(work.year, work.day).display(),
                "missing input"
            );
        }
    }

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(config.quiet);
    let mut aggregator = ResultAggregator::for_work(&work_items);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::ExecutorPanicked)??;

    formatter.print_summary(&results);
    Ok(())
}

/// All plugins, or only those carrying every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_links_duet_solvers() {
        let registry = build_registry(&[]).unwrap();
        assert!(registry.get_info(2017, 18).is_some());
        assert_eq!(registry.get_info(2017, 23).map(|i| i.parts), Some(1));
    }

    #[test]
    fn tag_filter_requires_every_tag() {
        let registry = build_registry(&["register-machine".to_string()]).unwrap();
        assert_eq!(registry.len(), 2);

        let registry = build_registry(&["register-machine".into(), "coprocessor".into()]).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get_info(2017, 23).is_some());

        let registry = build_registry(&["no-such-tag".to_string()]).unwrap();
        assert!(registry.is_empty());
    }
}
