//! sync-files CLI
//!
//! Checks, and optionally repairs, files that must stay identical to their
//! canonical copies in a source repository.

mod cli;
mod error;
mod exit;
mod logging;
mod render;

use clap::Parser;
use colored::Colorize;
use sync_core::{Mode, SyncEngine};
use sync_git::InterruptFlag;

use cli::Cli;
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.debug) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let interrupt = InterruptFlag::install()?;

    let mut engine = SyncEngine::new(cli.start_dir()?).with_interrupt(interrupt);
    if cli.write {
        engine = engine.with_mode(Mode::Write);
    }
    if let Some(path) = cli.config_path() {
        engine = engine.with_config_path(path);
    }

    let outcome = engine.run();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&render::json(&outcome)?)?);
    } else {
        render::human(&outcome);
    }

    let code = exit::for_outcome(&outcome);
    tracing::debug!(code, "Exiting");
    Ok(code)
}
