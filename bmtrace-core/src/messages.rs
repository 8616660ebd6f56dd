//! User-facing message catalog.
//!
//! Messages are templates with named parameters, rendered with
//! `tinytemplate`. Keeping the parameter names (`Path`, `Error`) stable lets a
//! translated catalog be swapped in without touching call sites.

use std::io;
use std::path::Path;

use serde_json::{json, Value};
use tinytemplate::TinyTemplate;

use crate::errors::TraceError;

/// Printed on the fallback stderr sink when a trace file cannot be opened.
pub const LOG_FILE_ERROR: &str = "An error occurred when creating log file '{Path}':\n{Error}\n\n";

/// Renders `template` with the given named parameters.
///
/// Values are inserted verbatim; the default HTML escaping of `tinytemplate`
/// is turned off since the output goes to a terminal or a plain text file.
pub fn render(template: &str, params: &Value) -> Result<String, TraceError> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("message", template)
        .map_err(|e| TraceError::Template(e.to_string()))?;
    tt.render("message", params)
        .map_err(|e| TraceError::Template(e.to_string()))
}

/// The diagnostic for a trace file that could not be opened.
pub fn log_file_error(path: &Path, err: &io::Error) -> String {
    let path = path.display().to_string();
    let error = err.to_string();
    render(LOG_FILE_ERROR, &json!({ "Path": path, "Error": error })).unwrap_or_else(|e| {
        log::warn!("Falling back to untemplated message: {}", e);
        format!("An error occurred when creating log file '{}':\n{}\n\n", path, error)
    })
}
