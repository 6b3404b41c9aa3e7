//! Samples command - list the built-in datasets.

use colored::Colorize;
use datalens::Sample;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Built-in samples:".yellow().bold());
    for sample in Sample::ALL {
        println!("  {:12} {}", sample.name().cyan(), sample.description());
    }
    println!();
    println!(
        "Run {} to explore one",
        "datalens analyze --sample <NAME>".cyan().bold()
    );
    Ok(())
}
