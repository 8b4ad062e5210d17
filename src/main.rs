mod cli;
mod commands;
mod config;
mod console;
mod error;
mod executor;
mod managers;
mod prompt;
mod system;
mod utils;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use error::BootstrapError;
use std::panic::{self, AssertUnwindSafe};
use utils::Interrupt;

fn main() {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG still wins over --verbose
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let interrupt = Interrupt::install().unwrap_or_else(|e| {
        log::warn!("Could not register SIGINT handler: {}", e);
        Interrupt::default()
    });

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        commands::install::run(cli.config.as_deref(), interrupt)
    }));

    let code = match result {
        Ok(Ok(outcome)) => outcome.exit_code(),
        Ok(Err(e)) => {
            // Run-level failures were already explained by the flow
            if e.downcast_ref::<BootstrapError>().is_none() {
                eprintln!("{}", format!("\n❌ Error: {:#}", e).red());
            }
            1
        }
        // The panic hook has printed the message
        Err(_) => 1,
    };

    std::process::exit(code);
}
