//! Netmotif - Network Topology DSL Runner
//!
//! Executes a topology DSL program and prints the resulting bindings.
//!
//! # Usage
//!
//! ```bash
//! netmotif topology.dsl
//! ```

use std::path::PathBuf;

use clap::Parser;
use netmotif::{check, dsl, error::Result, eval};

/// Network topology DSL runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the DSL source file (.dsl)
    #[arg(value_name = "SOURCE_FILE")]
    source_file: PathBuf,

    /// Print only the final expression value, not the bindings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Parse the source file
    let program = dsl::parse_file(&args.source_file)?;

    // Check before any graph is built
    check::check_program(&program)?;

    // Evaluate
    let result = eval::evaluate_program(&program)?;

    if !args.quiet {
        for (name, value) in result.environment.iter() {
            println!("{name} = {value}");
        }
    }
    match result.result {
        Some(value) => println!("{value}"),
        None if result.environment.is_empty() => println!("No result."),
        None => {}
    }

    Ok(())
}
