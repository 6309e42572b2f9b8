// In: src/window_pipeline/planner.rs

//! The Window Planner.
//!
//! Pure index arithmetic: given a sample count and a `WindowSpec`, produce the
//! ordered list of windows to score and the timestamp each one reports at.
//!
//! The two modes deliberately use different timestamp conventions:
//! - **Tiling** windows report where they *begin* (`i * window_size`).
//! - **Sliding** windows report where they *end* (`i * step + window_size`),
//!   i.e. "the ratio of the most recent `window_size` samples as of here".
//!   A sliding timestamp may lie past the last sample index.

use serde::{Deserialize, Serialize};

use crate::error::{CompressibilityError, Result};

//==================================================================================
// 1. Window Spec
//==================================================================================

/// How windows are laid over a recording.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub window_size: usize,
    /// Ignored when `sliding` is false; tiling always advances by `window_size`.
    pub step: usize,
    pub sliding: bool,
}

impl WindowSpec {
    /// Builds and validates a spec.
    pub fn new(window_size: usize, step: usize, sliding: bool) -> Result<Self> {
        let spec = Self {
            window_size,
            step,
            sliding,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Non-overlapping, back-to-back windows.
    pub fn tiling(window_size: usize) -> Result<Self> {
        Self::new(window_size, window_size, false)
    }

    pub fn sliding(window_size: usize, step: usize) -> Result<Self> {
        Self::new(window_size, step, true)
    }

    /// The distance between consecutive window starts.
    pub fn effective_step(&self) -> usize {
        if self.sliding {
            self.step
        } else {
            self.window_size
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.effective_step() == 0 {
            return Err(CompressibilityError::InvalidWindowSpec {
                window_size: self.window_size,
                step: self.step,
            });
        }
        Ok(())
    }
}

/// What to do with sliding windows that would run past the end of the recording.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrailingWindows {
    /// **Default:** never emit them. Every scored window holds exactly
    /// `window_size` samples, so all ratios are comparable.
    #[default]
    Drop,

    /// Emit one window per `step` (`total_samples / step` of them) and clip the
    /// trailing ones at the end of the recording. Timestamps still report
    /// `start + window_size`. Reproduces the historical notebook output.
    Truncate,
}

//==================================================================================
// 2. Window Plan
//==================================================================================

/// One window: the half-open sample range `[start, end)` and its output timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Position of this window in its plan.
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub timestamp: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// The ordered windows of one pass over a recording.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowPlan {
    windows: Vec<Window>,
}

impl WindowPlan {
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Window> {
        self.windows.get(index)
    }

    pub fn timestamps(&self) -> Vec<usize> {
        self.windows.iter().map(|w| w.timestamp).collect()
    }
}

//==================================================================================
// 3. Planning
//==================================================================================

/// Plans full windows only. See [`plan_with`].
///
/// For the historical one-window-per-step count, with clipped trailing
/// windows, use `plan_with(.., TrailingWindows::Truncate)`.
pub fn plan(total_samples: usize, spec: &WindowSpec) -> Result<WindowPlan> {
    plan_with(total_samples, spec, TrailingWindows::Drop)
}

/// Lays windows over `total_samples` samples.
///
/// Window counts always come from floor division; a window is never padded.
/// Fails with `InvalidWindowSpec` before doing anything else if the window size
/// or step is zero.
pub fn plan_with(
    total_samples: usize,
    spec: &WindowSpec,
    trailing: TrailingWindows,
) -> Result<WindowPlan> {
    spec.validate()?;
    let size = spec.window_size;

    let windows: Vec<Window> = if spec.sliding {
        let step = spec.step;
        (0..total_samples / step)
            .filter_map(|i| {
                let start = i * step;
                // A window whose end overflows lies past any recording.
                let end = start.checked_add(size);
                match trailing {
                    TrailingWindows::Drop => end
                        .filter(|&end| end <= total_samples)
                        .map(|end| (start, end, end)),
                    TrailingWindows::Truncate => Some((
                        start,
                        end.map_or(total_samples, |end| end.min(total_samples)),
                        start.saturating_add(size),
                    )),
                }
            })
            .enumerate()
            .map(|(index, (start, end, timestamp))| Window {
                index,
                start,
                end,
                timestamp,
            })
            .collect()
    } else {
        (0..total_samples / size)
            .map(|i| Window {
                index: i,
                start: i * size,
                end: i * size + size,
                timestamp: i * size,
            })
            .collect()
    };

    log::debug!(
        "Planned {} windows over {} samples (window_size={}, step={}, sliding={}, trailing={:?})",
        windows.len(),
        total_samples,
        size,
        spec.effective_step(),
        spec.sliding,
        trailing
    );

    Ok(WindowPlan { windows })
}
