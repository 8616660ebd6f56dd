//! Command implementations for the `bmtrace` binary.

pub mod trace;
