//! serpwidth CLI: pixel budget checks for search-result snippets

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use serpwidth::{CheckerConfig, SerpError, WidthChecker};

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logger(cli.fonts.log_level());

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.command.is_none() && cli.check.is_empty() {
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    }

    let config = cli.fonts.apply(CheckerConfig::from_env());
    let checker = WidthChecker::from_config(config);

    match &cli.command {
        Some(Commands::Batch(args)) => commands::batch::run(args, &checker)?,
        None => commands::check::run(&cli.check, &checker)?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Initialize logging based on the verbosity flag
fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Print the error chain once, with font remediation when it applies
fn report(err: &anyhow::Error) {
    eprintln!("Error: {err:#}");
    if let Some(missing) = err
        .downcast_ref::<SerpError>()
        .and_then(SerpError::font_not_found)
    {
        eprintln!();
        eprintln!("{}", missing.remediation());
    }
}
