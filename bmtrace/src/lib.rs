// bmtrace/src/lib.rs
//! # bmtrace CLI
//!
//! A small front end over `bmtrace-core`: it reads text, redacts credentials
//! and writes the result to the trace sink selected by `--trace` or
//! `BLUEMIX_TRACE`.

pub mod cli;
pub mod commands;
pub mod logger;

pub use commands::trace::{run_trace, TraceOptions};
