// bmtrace/src/main.rs
//! bmtrace entry point.

use std::io;
use std::process::ExitCode;

use bmtrace::cli::Cli;
use bmtrace::logger;
use bmtrace::{run_trace, TraceOptions};
use bmtrace_core::TraceSetting;
use clap::Parser;
use is_terminal::IsTerminal;
use log::debug;
use owo_colors::OwoColorize;

fn main() -> ExitCode {
    // A missing .env file is the normal case.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.debug, cli.quiet));
    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let opts = TraceOptions {
        setting: TraceSetting::parse(&cli.trace),
        raw: cli.raw,
        stats: cli.stats,
        inputs: cli.inputs,
    };

    match run_trace(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Trace run failed: {:?}", e);
            let message = format!("✗ {:#}", e);
            if io::stderr().is_terminal() {
                eprintln!("{}", message.red().bold());
            } else {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}
