use crate::config::{load_config_auto, validate_config};
use crate::console::Console;
use crate::executor::{Bootstrap, Outcome};
use crate::managers::fetch::HttpFetcher;
use crate::prompt::TerminalPrompter;
use crate::system::HostInfo;
use crate::utils::{Interrupt, SystemRunner};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(config_path: Option<&Path>, interrupt: Interrupt) -> Result<Outcome> {
    // Load config
    let config = load_config_auto(config_path)?;

    // Validate config
    validate_config(&config)?;

    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let host = HostInfo::current();
    let console = Console::terminal();
    let runner = SystemRunner::new(interrupt.clone());
    let fetcher = HttpFetcher::new(console.is_terminal(), interrupt.clone());
    let prompter = TerminalPrompter::new(interrupt);

    log::debug!("Host: {} / {}", host.os, host.arch);

    let outcome = Bootstrap {
        config: &config,
        host: &host,
        runner: &runner,
        fetcher: &fetcher,
        prompter: &prompter,
        console: &console,
        cwd: &cwd,
    }
    .run()?;

    Ok(outcome)
}
