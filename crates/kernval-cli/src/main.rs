//! Kernel contract validator CLI.
//!
//! Provides the `kernval` binary. Currently supports `check`, which loads a
//! JSON compilation unit (kernel contracts plus invocations, as produced by
//! the metadata extractor and call-site scanner) and validates it.
//!
//! Uses the same `kernval_check::validate_unit()` entry point as an
//! embedding compiler would, ensuring identical validation behavior from
//! both entry points.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use kernval_check::{validate_unit, CompilationUnit, UnitReport};
use kernval_core::built_in_library;

/// Kernel contract validator.
#[derive(Parser)]
#[command(name = "kernval", about = "Kernel contract validator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a compilation unit of kernel contracts and invocations.
    Check {
        /// Path to the JSON compilation-unit file.
        #[arg(short, long)]
        input: PathBuf,

        /// Register the shipped built-in library alongside the unit's own
        /// contracts.
        #[arg(long)]
        with_library: bool,

        /// Emit the report as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            input,
            with_library,
            json,
        } => {
            let exit_code = run_check(&input, with_library, json);
            process::exit(exit_code);
        }
    }
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 = clean, 2 = diagnostics reported,
/// 3 = I/O or malformed-input error.
fn run_check(input: &Path, with_library: bool, json: bool) -> i32 {
    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("error: failed to read {}: {error}", input.display());
            return 3;
        }
    };

    let mut unit: CompilationUnit = match serde_json::from_str(&text) {
        Ok(unit) => unit,
        Err(error) => {
            eprintln!("error: {} is not a valid compilation unit: {error}", input.display());
            return 3;
        }
    };

    if with_library {
        let mut contracts = built_in_library();
        contracts.extend(unit.contracts);
        unit.contracts = contracts;
    }

    let report = validate_unit(&unit);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => {
                eprintln!("error: failed to render report: {error}");
                return 3;
            }
        }
    } else {
        print_report(&report);
    }

    if report.is_clean() {
        0
    } else {
        2
    }
}

fn print_report(report: &UnitReport) {
    for entry in &report.entries {
        println!("error: {}: {}", entry.origin, entry.diagnostic);
    }
    println!(
        "{} invocation(s) bound, {} diagnostic(s)",
        report.bound.len(),
        report.entries.len()
    );
}
