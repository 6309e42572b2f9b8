//! This file is the root of the `compressibility` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`window_pipeline`,
//!     `kernels`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of types most callers need.
//! 3.  With the `python` feature, defining the `#[pymodule]` which acts as the
//!     main entry point when the compiled library is imported into Python.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod observability;
pub mod types;
pub mod window_pipeline;

#[cfg(feature = "python")]
mod ffi;

pub use bridge::{compress_events, compress_recording, compress_recording_pyramid};
pub use config::CompressibilityConfig;
pub use error::{CompressibilityError, Result};
pub use kernels::{ByteOrder, Codec, CodecKind};
pub use types::{
    CompressibilitySample, CompressibilitySeries, EventInterval, EventResults, Events,
    PyramidResult, SampleArray,
};
pub use window_pipeline::{TrailingWindows, WindowSpec};

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `compressibility` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn compressibility(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::python::compress_recording_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::python::compress_recording_pyramid_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::python::compress_events_py, m)?)?;

    // --- Expose the custom error type ---
    m.add(
        "CompressibilityError",
        m.py().get_type_bound::<pyo3::exceptions::PyValueError>(),
    )?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    // --- Turn on logging for run progress ---
    m.add_function(wrap_pyfunction!(ffi::python::enable_verbose_logging_py, m)?)?;

    Ok(())
}
