//! Datalens CLI - tabular data exploration and workforce analytics.

mod cli;
mod commands;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_timestamps(cli.log_timestamps)
        .with_ansi(!cli.no_color);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Analyze {
            file,
            sample,
            delimiter,
            chart,
            preview,
            json,
        } => commands::analyze::run(file, sample, delimiter, chart, preview, json),

        Commands::Hr {
            file,
            departments,
            seed,
            top,
            json,
        } => commands::hr::run(file, departments, seed, top, json),

        Commands::Samples => commands::samples::run(),

        Commands::Serve { port } => commands::serve::run(port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
