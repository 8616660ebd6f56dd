//! Trace configuration for `bmtrace-core`.
//!
//! A trace setting is a single free-form string, usually read from the
//! `BLUEMIX_TRACE` environment variable. Two words are reserved (compared
//! case-insensitively): `false` (or the empty string) disables tracing and
//! `true` sends trace output to stderr. Every other value names a file.
//!
//! License: MIT OR Apache-2.0

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

/// Environment variable consulted by [`TraceSetting::from_env`].
pub const TRACE_ENV_VAR: &str = "BLUEMIX_TRACE";

/// Where trace output should go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TraceSetting {
    /// Trace output is discarded.
    #[default]
    Disabled,
    /// Trace output goes to the process's standard error stream.
    Stderr,
    /// Trace output is appended to the file at this path.
    File(PathBuf),
}

impl TraceSetting {
    /// Parses a setting string. Parsing is total: anything that is not a
    /// reserved word is a path, kept exactly as written (no trimming, no
    /// case folding).
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("false") {
            TraceSetting::Disabled
        } else if value.eq_ignore_ascii_case("true") {
            TraceSetting::Stderr
        } else {
            TraceSetting::File(PathBuf::from(value))
        }
    }

    /// Like [`TraceSetting::parse`], but accepts values that are not valid
    /// UTF-8. Such values can never be a reserved word, so they are paths.
    pub fn parse_os(value: &OsStr) -> Self {
        match value.to_str() {
            Some(s) => Self::parse(s),
            None => TraceSetting::File(PathBuf::from(value)),
        }
    }

    /// Reads the setting from [`TRACE_ENV_VAR`]. An unset variable means
    /// tracing is disabled.
    pub fn from_env() -> Self {
        Self::from_env_var(TRACE_ENV_VAR)
    }

    /// Reads the setting from an arbitrary environment variable.
    pub fn from_env_var(name: &str) -> Self {
        let value = std::env::var_os(name).unwrap_or_else(OsString::new);
        let setting = Self::parse_os(&value);
        debug!("Trace setting from ${}: {}", name, setting);
        setting
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, TraceSetting::Disabled)
    }

    /// The target file, if this setting names one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            TraceSetting::File(path) => Some(path),
            _ => None,
        }
    }
}

impl FromStr for TraceSetting {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for TraceSetting {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for TraceSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceSetting::Disabled => write!(f, "disabled"),
            TraceSetting::Stderr => write!(f, "stderr"),
            TraceSetting::File(path) => write!(f, "file '{}'", path.display()),
        }
    }
}
