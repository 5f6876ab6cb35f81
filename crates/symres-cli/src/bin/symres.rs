#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use symres_cli::args::{CliArgs, Command};
use symres_cli::commands;
use symres_cli::reporter::Reporter;
use symres_cli::tracing_config::{LogSettings, init_tracing};

/// Exit status when the command ran but reported diagnostics.
const EXIT_DIAGNOSTICS: u8 = 1;

fn main() -> Result<ExitCode> {
    init_tracing(&LogSettings::from_env())?;

    let args = CliArgs::parse();
    let report = match &args.command {
        Command::Resolve(resolve) => commands::resolve(resolve)?,
        Command::Overrides(overrides) => commands::overrides(overrides)?,
    };

    if !report.output.is_empty() {
        println!("{}", report.output);
    }
    if !report.has_errors() {
        return Ok(ExitCode::SUCCESS);
    }

    let color = !args.no_color && !args.json && std::io::stderr().is_terminal();
    let reporter = Reporter::new(color);
    if args.json {
        eprintln!("{}", reporter.render_json(&report.diagnostics));
    } else {
        eprintln!("{}", reporter.render(&report.diagnostics));
    }
    Ok(ExitCode::from(EXIT_DIAGNOSTICS))
}
