//! The process-wide default trace sink.
//!
//! The slot is written at most once, during startup and before any other
//! thread reads it. Until then [`logger`] hands out a null sink, so library
//! code can trace unconditionally.

use once_cell::sync::OnceCell;

use crate::config::TraceSetting;
use crate::errors::TraceError;
use crate::sink::TraceSink;

static LOGGER: OnceCell<TraceSink> = OnceCell::new();
static UNSET: TraceSink = TraceSink::Null;

/// Installs the process-wide sink built from `setting`.
///
/// Fails with [`TraceError::AlreadyInitialized`] if a sink was installed
/// before. The sink that was already in place is left untouched.
pub fn init_logger(setting: &TraceSetting) -> Result<&'static TraceSink, TraceError> {
    install_logger(TraceSink::new(setting))
}

/// Installs an already-built sink as the process-wide sink.
pub fn install_logger(sink: TraceSink) -> Result<&'static TraceSink, TraceError> {
    LOGGER
        .set(sink)
        .map_err(|_| TraceError::AlreadyInitialized)?;
    Ok(logger())
}

/// The process-wide sink, or a null sink if none has been installed.
pub fn logger() -> &'static TraceSink {
    LOGGER.get().unwrap_or(&UNSET)
}
