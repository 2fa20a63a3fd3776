//! Append-only trace diagnostics.
//!
//! When a handle has a trace filename configured, each significant operation
//! appends one timestamped line. Tracing is best-effort: a failure to write
//! the trace never fails the traced operation.

use chrono::{SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append a single trace line, ignoring any I/O failure.
pub(crate) fn append<P: AsRef<Path>>(path: P, message: &str) {
    let line = format!(
        "{} relock: {}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        message
    );

    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())
        .and_then(|mut file| file.write_all(line.as_bytes()));
}
