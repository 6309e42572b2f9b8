// In: src/error.rs

//! This module defines the single, unified error type for the entire compressibility library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressibilityError {
    // =========================================================================
    // === Configuration & Planning Errors (fail fast, before any compression)
    // =========================================================================
    #[error("Invalid window spec: window_size={window_size}, step={step} (both must be > 0)")]
    InvalidWindowSpec { window_size: usize, step: usize },

    #[error("Unsupported codec: '{0}' (supported: gzip-deflate, zstd)")]
    UnsupportedCodec(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Event interval [{start}, {end}) does not fit a sample array of length {len}")]
    IntervalOutOfBounds { start: usize, end: usize, len: usize },

    // =========================================================================
    // === Estimation Errors
    // =========================================================================
    /// A zero-length window reached the estimator. This is always a planning bug.
    #[error("Empty window [{start}, {end}) reached the estimator (this is a bug)")]
    EmptyWindow { start: usize, end: usize },

    #[error("{codec} compression failed: {message}")]
    CodecFailure { codec: String, message: String },

    // =========================================================================
    // === Scheduling Errors
    // =========================================================================
    #[error("Window {window_index} (timestamp {timestamp}) failed: {source}")]
    WorkerFailure {
        window_index: usize,
        timestamp: usize,
        #[source]
        source: Box<CompressibilityError>,
    },

    #[error("Worker pool could not be provisioned: {0}")]
    ResourceExhausted(String),

    #[error("Run cancelled after scoring {scored} of {total} windows")]
    Cancelled { scored: usize, total: usize },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g. a config file not found).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during config loading or result export.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompressibilityError>;

impl CompressibilityError {
    /// Returns the plan index of the failing window, if this error came out of the scheduler.
    pub fn window_index(&self) -> Option<usize> {
        match self {
            CompressibilityError::WorkerFailure { window_index, .. } => Some(*window_index),
            _ => None,
        }
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<rayon::ThreadPoolBuildError> for CompressibilityError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        CompressibilityError::ResourceExhausted(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<CompressibilityError> for pyo3::PyErr {
    fn from(err: CompressibilityError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
