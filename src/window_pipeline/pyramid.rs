// In: src/window_pipeline/pyramid.rs

//! The Pyramid Orchestrator.
//!
//! Runs the single-resolution pipeline once per window size, all with the same
//! step, so the i-th sample of every series is reported at `i * step + size`.
//! Unlike a single run, resolutions fail independently: a bad window size is
//! recorded as that resolution's failure and the others are still returned.

use std::collections::BTreeSet;
use std::time::Instant;

use num_traits::AsPrimitive;

use crate::error::Result;
use crate::kernels::Codec;
use crate::types::{PyramidResult, SampleArray};
use crate::window_pipeline::estimator::CompressibilityEstimator;
use crate::window_pipeline::planner::{plan_with, WindowSpec};
use crate::window_pipeline::pool::WorkerPool;
use crate::window_pipeline::scheduler::run_on_pool;
use crate::window_pipeline::RunOptions;

/// Computes one sliding-window series per entry of `window_sizes`.
///
/// One worker pool is acquired for the whole pyramid. Only pool acquisition
/// fails the call as a whole; everything else is isolated per resolution.
/// Repeated window sizes are computed once.
pub fn run_pyramid<T>(
    samples: &SampleArray<'_, T>,
    window_sizes: &[usize],
    step: usize,
    codec: &dyn Codec,
    options: &RunOptions,
) -> Result<PyramidResult>
where
    T: AsPrimitive<f32> + Sync,
{
    let pool = WorkerPool::acquire(options.worker_count)?;
    Ok(run_pyramid_on_pool(
        &pool,
        samples,
        window_sizes,
        step,
        codec,
        options,
    ))
}

fn run_pyramid_on_pool<T>(
    pool: &WorkerPool,
    samples: &SampleArray<'_, T>,
    window_sizes: &[usize],
    step: usize,
    codec: &dyn Codec,
    options: &RunOptions,
) -> PyramidResult
where
    T: AsPrimitive<f32> + Sync,
{
    let start_overall = Instant::now();
    let estimator = CompressibilityEstimator::new(*samples, codec, options.byte_order);
    let mut result = PyramidResult::new();
    let mut seen = BTreeSet::new();

    for &window_size in window_sizes {
        if !seen.insert(window_size) {
            continue;
        }

        let start_resolution = Instant::now();
        let outcome = WindowSpec::sliding(window_size, step)
            .and_then(|spec| plan_with(samples.len(), &spec, options.trailing_windows))
            .and_then(|plan| run_on_pool(pool, &plan, &estimator, &options.cancel));

        match &outcome {
            Ok(series) => log::debug!(
                "  - Resolution {:>8} | {} windows | {:.2?}",
                window_size,
                series.len(),
                start_resolution.elapsed()
            ),
            Err(err) => log::warn!("  - Resolution {:>8} | FAILED: {}", window_size, err),
        }
        result.insert(window_size, outcome);
    }

    log::info!(
        "Pyramid of {} resolutions ({} failed) finished in {:.2?}",
        result.len(),
        result.failed().count(),
        start_overall.elapsed()
    );
    result
}

