// In: src/config.rs

//! The single source of truth for all compressibility run configuration.
//!
//! `CompressibilityConfig` is created once at the application boundary (from a
//! JSON document, a Python keyword dict, or plain struct literal syntax) and
//! passed by reference into the `bridge` functions. Every field has a serde
//! default, so a config document only needs to name what it changes.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CompressibilityError, Result};
use crate::kernels::{ByteOrder, Codec, CodecKind};
use crate::window_pipeline::{CancellationToken, RunOptions, TrailingWindows, WindowSpec};

//==================================================================================
// I. The Unified CompressibilityConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompressibilityConfig {
    /// Samples per window.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Distance between consecutive sliding windows. Ignored when tiling.
    #[serde(default = "default_step", alias = "increment", alias = "inc")]
    pub step: usize,

    /// `false` lays non-overlapping windows back to back.
    #[serde(default = "default_true")]
    pub sliding: bool,

    #[serde(default)]
    pub codec: CodecKind,

    /// `None` uses the codec's own default level.
    #[serde(default)]
    pub compression_level: Option<i32>,

    /// Byte order of the serialized samples. Fixed for a whole run.
    #[serde(default)]
    pub byte_order: ByteOrder,

    /// `None` uses one worker per hardware thread.
    #[serde(default)]
    pub worker_count: Option<usize>,

    /// Resolutions for a pyramid run. Unused by single-resolution runs.
    #[serde(default)]
    pub window_sizes: Vec<usize>,

    #[serde(default)]
    pub trailing_windows: TrailingWindows,

    /// Deadline for one whole run, measured from when its options are built.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for CompressibilityConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            step: default_step(),
            sliding: true,
            codec: CodecKind::default(),
            compression_level: None,
            byte_order: ByteOrder::default(),
            worker_count: None,
            window_sizes: Vec::new(),
            trailing_windows: TrailingWindows::default(),
            timeout_ms: None,
        }
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

fn default_window_size() -> usize {
    20_000
}

fn default_step() -> usize {
    9_000
}

//==================================================================================
// II. Loading & Derived Settings
//==================================================================================

impl CompressibilityConfig {
    /// Parses a JSON config document and checks its execution settings.
    ///
    /// The single-run window spec is checked by the run that uses it, so a
    /// pyramid document does not need a meaningful `window_size`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_execution()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Rejects settings that cannot produce a single-resolution run.
    pub fn validate(&self) -> Result<()> {
        self.window_spec()?;
        self.validate_execution()
    }

    /// Checks only the settings every run mode shares. Pyramid runs use this,
    /// since their window sizes are checked per resolution.
    pub fn validate_execution(&self) -> Result<()> {
        if self.worker_count == Some(0) {
            return Err(CompressibilityError::InvalidConfig(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.timeout_ms == Some(0) {
            return Err(CompressibilityError::InvalidConfig(
                "timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn window_spec(&self) -> Result<WindowSpec> {
        WindowSpec::new(self.window_size, self.step, self.sliding)
    }

    pub fn build_codec(&self) -> Result<Box<dyn Codec>> {
        self.codec.build(self.compression_level)
    }

    /// Execution options for one run. A configured timeout starts counting now.
    pub fn run_options(&self) -> RunOptions {
        let cancel = match self.timeout_ms {
            Some(ms) => CancellationToken::with_timeout(Duration::from_millis(ms)),
            None => CancellationToken::new(),
        };
        RunOptions {
            worker_count: self.worker_count,
            byte_order: self.byte_order,
            trailing_windows: self.trailing_windows,
            cancel,
        }
    }
}
