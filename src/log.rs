// src/log.rs
//
// Logging goes through `tracing`. The macros keep the short call sites used
// across the crate; `init()` wires a subscriber for the binary.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::consts::LOG_FILE;

/// Install the global subscriber: `RUST_LOG` filter (default `info`), human
/// output on stderr, plus a plain-text mirror in `<log_dir>/debug.log`. The
/// CLI passes its store directory.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let mirror = open_mirror(log_dir)
        .map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(mirror)
        .try_init();
}

/// No mirror when the directory cannot be created; console logging still works.
fn open_mirror(log_dir: &Path) -> Option<File> {
    fs::create_dir_all(log_dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE))
        .ok()
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
