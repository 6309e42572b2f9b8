//! This module is the windowed compressibility engine.
//!
//! Data flow:
//!
//!   raw samples -> [planner] window plan -> [scheduler + estimator] ordered
//!   ratio series -> (optionally) [pyramid] one series per window size
//!
//! Everything here receives its inputs as explicit arguments. There is no
//! global state, so the engine runs as readily on synthetic arrays in tests
//! as on real recordings.

use num_traits::AsPrimitive;

use crate::error::Result;
use crate::kernels::{ByteOrder, Codec};
use crate::types::{CompressibilitySeries, SampleArray};

//==================================================================================
// 1. Module Declarations
//==================================================================================

pub mod cancel;
pub mod estimator;
pub mod planner;
pub mod pool;
pub mod pyramid;
pub mod scheduler;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use self::cancel::CancellationToken;
pub use self::estimator::{score, CompressibilityEstimator, WindowScorer};
pub use self::planner::{plan, plan_with, TrailingWindows, Window, WindowPlan, WindowSpec};
pub use self::pool::WorkerPool;
pub use self::pyramid::run_pyramid;
pub use self::scheduler::run_on_pool;

/// Execution settings shared by single-resolution and pyramid runs.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// `None` uses one worker per hardware thread.
    pub worker_count: Option<usize>,
    pub byte_order: ByteOrder,
    pub trailing_windows: TrailingWindows,
    pub cancel: CancellationToken,
}

impl RunOptions {
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = Some(worker_count);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_trailing_windows(mut self, trailing_windows: TrailingWindows) -> Self {
        self.trailing_windows = trailing_windows;
        self
    }
}

/// Scores every window of `plan` over `samples`, acquiring and releasing a
/// worker pool for the duration of the call.
pub fn run<T>(
    samples: &SampleArray<'_, T>,
    plan: &WindowPlan,
    codec: &dyn Codec,
    options: &RunOptions,
) -> Result<CompressibilitySeries>
where
    T: AsPrimitive<f32> + Sync,
{
    let pool = WorkerPool::acquire(options.worker_count)?;
    let estimator = CompressibilityEstimator::new(*samples, codec, options.byte_order);
    run_on_pool(&pool, plan, &estimator, &options.cancel)
}

#[cfg(test)]
mod planner_tests;
