//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            match &result.answer {
                Ok(answer) => println!("{}", answer),
                Err(e) => eprintln!("Error: {}", e),
            }
            return;
        }

        match format_result(result) {
            Ok(line) => println!("{}", line),
            Err(line) => eprintln!("{}", line),
        }
    }

    /// Print a summary after all results
    ///
    /// Shows both total compute time (sum of durations) and wall-clock time.
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let elapsed = self.start_time.elapsed();
        println!();
        for line in summary_lines(results, elapsed) {
            println!("{}", line);
        }
    }
}

/// `2017/18 Part 1: <answer> (parse: …, solve: …)`; the error variant goes to stderr
fn format_result(result: &SolverResult) -> Result<String, String> {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            Ok(format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            ))
        }
        Err(e) => Err(format!("{}: Error - {}", prefix, e)),
    }
}

fn summary_lines(results: &[SolverResult], elapsed: std::time::Duration) -> Vec<String> {
    let solved: Vec<&SolverResult> = results.iter().filter(|r| r.answer.is_ok()).collect();
    let failures = results.len() - solved.len();

    let total_parse_time: TimeDelta = solved.iter().filter_map(|r| r.parse_duration).sum();
    let total_solve_time: TimeDelta = solved.iter().map(|r| r.solve_duration).sum();
    let elapsed_delta = TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::MAX);

    let mut lines = vec![
        "--- Summary ---".to_string(),
        format!("Solvers: {} solved, {} failed", solved.len(), failures),
        format!("Total parse time: {}", format_duration(total_parse_time)),
        format!("Total solve time: {}", format_duration(total_solve_time)),
        format!("Elapsed wall-clock time: {}", format_duration(elapsed_delta)),
    ];

    if !elapsed.is_zero() {
        let compute = total_parse_time + total_solve_time;
        let compute_secs = compute.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
        lines.push(format!(
            "Speedup factor: {:.2}x",
            compute_secs / elapsed.as_secs_f64()
        ));
    }
    lines
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}
