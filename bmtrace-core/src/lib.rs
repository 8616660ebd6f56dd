// bmtrace-core/src/lib.rs
//! # bmtrace Core Library
//!
//! `bmtrace-core` provides the trace plumbing for a command-line tool's
//! diagnostic output. It has two independent halves:
//!
//! * a **sink selector** that turns one configuration string into a place to
//!   write trace lines (nowhere, stderr, or an append-only file), and
//! * a **sanitizer** that strips credentials out of text before it is traced.
//!
//! Nothing connects the two: callers sanitize what they print.
//!
//! ## Modules
//!
//! * `config`: Parses trace settings (`""`, `false`, `true`, or a path).
//! * `sink`: The `Printer`/`Closer` traits and the `TraceSink` variants.
//! * `global`: The write-once process-wide default sink.
//! * `sanitizers`: Regex rules that redact headers, parameters and JSON fields.
//! * `messages`: Templated user-facing messages.
//! * `errors`: The library's error type.
//!
//! ## Usage Example
//!
//! ```rust
//! use bmtrace_core::{new_logger, sanitize, trace_println, Closer};
//!
//! let sink = new_logger("false");
//! let request = "GET /v2/apps?access_token=abc123 HTTP/1.1";
//! if sink.is_enabled() {
//!     trace_println!(sink, "REQUEST:", sanitize(request));
//! }
//! sink.close().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Selecting a sink never fails; a trace file that cannot be opened degrades
//! to stderr. Printing never reports errors. Only closing a sink, installing
//! the global sink twice, and the strict constructors return a `TraceError`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod global;
pub mod messages;
pub mod sanitizers;
pub mod sink;

pub use config::{TraceSetting, TRACE_ENV_VAR};

pub use errors::TraceError;

pub use global::{init_logger, install_logger, logger};

pub use sanitizers::{
    default_rules, sanitize, RedactionSummaryItem, Sanitizer, PRIVATE_DATA_PLACEHOLDER,
};
pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules, TraceRule};

pub use sink::{new_logger, Closer, Printer, TraceSink};
