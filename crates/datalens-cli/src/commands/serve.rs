//! Serve command - expose the dashboard as a JSON API.

use colored::Colorize;
use datalens::DashboardConfig;

use crate::server::{app, state::AppState};

pub fn run(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(DashboardConfig::default());

    println!(
        "{} http://127.0.0.1:{}/api/samples",
        "Serving".cyan().bold(),
        port
    );
    println!("Press Ctrl+C to stop");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))
}
