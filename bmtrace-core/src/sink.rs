//! Trace sinks.
//!
//! A [`TraceSink`] is one of three destinations: nowhere, the process's
//! standard error stream, or a file opened for appending. All three accept
//! text through the [`Printer`] trait and release their resources through
//! [`Closer`].
//!
//! Printing is best-effort. A trace line that cannot be written is dropped
//! without telling the caller.
//!
//! License: MIT OR APACHE 2.0

use std::fmt::{self, Display, Write as _};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::TraceSetting;
use crate::errors::TraceError;
use crate::messages;

/// Text output shared by every sink variant.
///
/// None of these methods report failure.
pub trait Printer {
    /// Writes the arguments separated by single spaces. A newline is added
    /// unless the text already ends with one.
    fn print(&self, args: &[&dyn Display]);

    /// Writes pre-formatted arguments (see [`format_args!`]). A newline is
    /// added unless the text already ends with one.
    fn printf(&self, args: fmt::Arguments<'_>);

    /// Writes the arguments separated by single spaces, followed by a newline.
    fn println(&self, args: &[&dyn Display]);
}

/// Releases whatever the sink holds.
pub trait Closer {
    fn close(self) -> Result<(), TraceError>
    where
        Self: Sized;
}

/// Formats and prints to a [`Printer`], like `printf`.
#[macro_export]
macro_rules! trace_printf {
    ($sink:expr, $($arg:tt)*) => {{
        use $crate::sink::Printer as _;
        $sink.printf(format_args!($($arg)*))
    }};
}

/// Prints each argument separated by spaces, followed by a newline.
#[macro_export]
macro_rules! trace_println {
    ($sink:expr $(, $arg:expr)* $(,)?) => {{
        use $crate::sink::Printer as _;
        $sink.println(&[$(&$arg as &dyn ::std::fmt::Display),*])
    }};
}

/// A destination for trace output.
#[derive(Debug)]
pub enum TraceSink {
    /// Discards everything.
    Null,
    /// Writes to the process's standard error stream, which it does not own.
    Stderr,
    /// Appends to a file it owns exclusively.
    File { path: PathBuf, file: File },
}

impl TraceSink {
    /// Builds the sink for a parsed setting. Never fails: a file that cannot
    /// be opened falls back to stderr (see [`TraceSink::file`]).
    pub fn new(setting: &TraceSetting) -> Self {
        let sink = match setting {
            TraceSetting::Disabled => Self::null(),
            TraceSetting::Stderr => Self::stderr(),
            TraceSetting::File(path) => Self::file(path),
        };
        debug!("Selected trace sink: {}", sink.describe());
        sink
    }

    pub fn null() -> Self {
        TraceSink::Null
    }

    pub fn stderr() -> Self {
        TraceSink::Stderr
    }

    /// Opens `path` for appending, creating it if needed.
    ///
    /// On failure the returned sink writes to stderr, and the first thing it
    /// writes is a message naming the path and the OS error.
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match open_append(path) {
            Ok(file) => TraceSink::File {
                path: path.to_path_buf(),
                file,
            },
            Err(source) => {
                debug!("Cannot open trace file '{}', tracing to stderr: {}", path.display(), source);
                let sink = Self::stderr();
                sink.printf(format_args!("{}", messages::log_file_error(path, &source)));
                sink
            }
        }
    }

    /// Opens `path` for appending, creating it if needed, and reports failure
    /// to the caller instead of falling back.
    pub fn try_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = open_append(path).map_err(|source| TraceError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(TraceSink::File {
            path: path.to_path_buf(),
            file,
        })
    }

    /// False only for the null sink. Callers can use this to skip building
    /// (and sanitizing) trace text nobody will see.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, TraceSink::Null)
    }

    /// The file this sink appends to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            TraceSink::File { path, .. } => Some(path),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            TraceSink::Null => "null".to_string(),
            TraceSink::Stderr => "stderr".to_string(),
            TraceSink::File { path, .. } => format!("file '{}'", path.display()),
        }
    }

    fn emit(&self, record: &str) {
        let result = match self {
            TraceSink::Null => return,
            TraceSink::Stderr => io::stderr().lock().write_all(record.as_bytes()),
            TraceSink::File { file, .. } => {
                let mut handle: &File = file;
                handle.write_all(record.as_bytes())
            }
        };
        // Best effort.
        let _ = result;
    }
}

impl Printer for TraceSink {
    fn print(&self, args: &[&dyn Display]) {
        if self.is_enabled() {
            self.emit(&ensure_newline(join_args(args)));
        }
    }

    fn printf(&self, args: fmt::Arguments<'_>) {
        if self.is_enabled() {
            self.emit(&ensure_newline(fmt::format(args)));
        }
    }

    fn println(&self, args: &[&dyn Display]) {
        if self.is_enabled() {
            let mut record = join_args(args);
            record.push('\n');
            self.emit(&record);
        }
    }
}

impl Closer for TraceSink {
    /// Releases the file handle of a file sink, returning any error seen while
    /// flushing it to disk. The null and stderr sinks have nothing to release;
    /// stderr in particular belongs to the process and stays open.
    fn close(self) -> Result<(), TraceError> {
        match self {
            TraceSink::Null | TraceSink::Stderr => Ok(()),
            TraceSink::File { path, mut file } => {
                let result = file.flush().and_then(|()| sync_if_regular(&file));
                drop(file);
                debug!("Closed trace file '{}'", path.display());
                result.map_err(|source| TraceError::Close { path, source })
            }
        }
    }
}

/// Opens read-write in append mode, never truncating. New files get mode
/// `0666` (before umask) on Unix.
fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).read(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options.open(path)
}

/// Character devices and pipes reject `fsync`, so only regular files are
/// synced.
fn sync_if_regular(file: &File) -> io::Result<()> {
    if file.metadata()?.is_file() {
        file.sync_all()
    } else {
        Ok(())
    }
}

fn join_args(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out
}

fn ensure_newline(mut record: String) -> String {
    if !record.ends_with('\n') {
        record.push('\n');
    }
    record
}

/// Builds the sink for a raw setting string such as the value of
/// `BLUEMIX_TRACE`: `""`/`"false"` disable tracing, `"true"` traces to stderr,
/// anything else is a file path.
pub fn new_logger(value: &str) -> TraceSink {
    TraceSink::new(&TraceSetting::parse(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_joins_with_spaces_and_terminates() {
        let record = ensure_newline(join_args(&[&"GET", &"/v2/apps", &200]));
        assert_eq!(record, "GET /v2/apps 200\n");
    }

    #[test]
    fn test_existing_newline_is_not_doubled() {
        assert_eq!(ensure_newline("done\n".to_string()), "done\n");
        assert_eq!(ensure_newline(String::new()), "\n");
    }

    #[test]
    fn test_join_of_no_arguments_is_empty() {
        assert_eq!(join_args(&[]), "");
    }

    #[test]
    fn test_reserved_settings_select_variants() {
        assert!(matches!(new_logger(""), TraceSink::Null));
        assert!(matches!(new_logger("FALSE"), TraceSink::Null));
        assert!(matches!(new_logger("True"), TraceSink::Stderr));
    }

    #[test]
    fn test_null_sink_is_disabled_and_closes_cleanly() {
        let sink = TraceSink::null();
        assert!(!sink.is_enabled());
        sink.print(&[&"ignored"]);
        assert!(sink.close().is_ok());
    }

    #[test]
    fn test_stderr_sink_close_is_a_no_op() {
        let sink = TraceSink::stderr();
        assert!(sink.is_enabled());
        assert!(sink.path().is_none());
        assert!(sink.close().is_ok());
    }

    // procfs files are regular files that do not support fsync.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_close_reports_sync_failure() {
        let path = PathBuf::from("/proc/self/status");
        let file = File::open(&path).unwrap();
        let sink = TraceSink::File { path: path.clone(), file };

        match sink.close() {
            Err(TraceError::Close { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected a close error, got {:?}", other),
        }
    }
}
