// In: src/observability.rs

//! Logger installation for drivers and bindings.
//!
//! The library itself only talks to the `log` facade. Hosts that do not bring
//! their own logger call `init_logging` once to get compact `[LEVEL] message`
//! lines on stderr or appended to a file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::{CompressibilityError, Result};

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `level`.
///
/// Only the first call installs anything. A later call without a file is a
/// no-op; a later call with a file fails with `InvalidConfig` and leaves the
/// file untouched, since the existing logger cannot be redirected.
pub fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    if INIT_LOGGER.is_completed() {
        return match log_file {
            Some(path) => Err(CompressibilityError::InvalidConfig(format!(
                "a logger is already installed; cannot redirect it to {}",
                path.display()
            ))),
            None => Ok(()),
        };
    }

    // Opened up front so a bad path is reported instead of swallowed by the Once.
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(move || {
        let mut builder = env_logger::Builder::new();
        builder.is_test(false);
        builder.filter_level(level);
        builder.format(|buf, record| {
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
