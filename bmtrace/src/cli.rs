// bmtrace/src/cli.rs
//! Command-line interface definition for the `bmtrace` binary.

use clap::Parser;
use std::path::PathBuf;

use bmtrace_core::TRACE_ENV_VAR;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "bmtrace",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Write text to a trace sink, hiding credentials on the way",
    long_about = "bmtrace reads text from files or stdin and writes every line to a trace sink. \
                  The sink is chosen by --trace or BLUEMIX_TRACE: empty or 'false' discards, \
                  'true' writes to stderr, anything else is appended to that file. \
                  Authorization headers, password/token parameters and secret JSON fields \
                  are replaced with [PRIVATE DATA HIDDEN] unless --raw is given.",
)]
pub struct Cli {
    /// Trace destination: "", "false", "true", or a file path.
    #[arg(long, value_name = "VALUE", env = TRACE_ENV_VAR, default_value = "", hide_env_values = true)]
    pub trace: String,

    /// Write lines exactly as read, without redaction.
    #[arg(long)]
    pub raw: bool,

    /// Print how many values each redaction rule hid, once all input is read.
    #[arg(long, conflicts_with = "raw")]
    pub stats: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Suppress all internal logging.
    #[arg(long, short = 'q', conflicts_with = "debug")]
    pub quiet: bool,

    /// Input files; reads stdin when none are given or for "-".
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,
}
