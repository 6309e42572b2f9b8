// In: src/bridge/stateless_api.rs

use std::time::Instant;

use num_traits::AsPrimitive;

use crate::config::CompressibilityConfig;
use crate::error::{CompressibilityError, Result};
use crate::types::{CompressibilitySeries, EventResults, Events, PyramidResult, SampleArray};
use crate::window_pipeline::{self, plan_with, run_on_pool, CompressibilityEstimator, WorkerPool};

/// Computes the compressibility series of a whole recording.
pub fn compress_recording<T>(
    samples: &SampleArray<'_, T>,
    config: &CompressibilityConfig,
) -> Result<CompressibilitySeries>
where
    T: AsPrimitive<f32> + Sync,
{
    config.validate()?;
    let codec = config.build_codec()?;
    let options = config.run_options();
    let plan = plan_with(samples.len(), &config.window_spec()?, options.trailing_windows)?;

    log::info!(
        "Compressing {} samples x {} channels: {} windows with {}",
        samples.len(),
        samples.channels(),
        plan.len(),
        config.codec
    );
    window_pipeline::run(samples, &plan, codec.as_ref(), &options)
}

/// Computes one sliding-window series per entry of `config.window_sizes`, all
/// with `config.step`.
///
/// `config.window_size` and `config.sliding` are not used. A bad size or step
/// fails only the resolutions it affects.
pub fn compress_recording_pyramid<T>(
    samples: &SampleArray<'_, T>,
    config: &CompressibilityConfig,
) -> Result<PyramidResult>
where
    T: AsPrimitive<f32> + Sync,
{
    config.validate_execution()?;
    if config.window_sizes.is_empty() {
        return Err(CompressibilityError::InvalidConfig(
            "window_sizes must name at least one resolution".to_string(),
        ));
    }
    let codec = config.build_codec()?;
    let options = config.run_options();
    window_pipeline::run_pyramid(
        samples,
        &config.window_sizes,
        config.step,
        codec.as_ref(),
        &options,
    )
}

/// Runs the configured single-resolution pipeline over each named event
/// interval.
///
/// Events fail independently. Timestamps are shifted by the interval start so
/// they index into the full recording.
pub fn compress_events<T>(
    samples: &SampleArray<'_, T>,
    events: &Events,
    config: &CompressibilityConfig,
) -> Result<EventResults>
where
    T: AsPrimitive<f32> + Sync,
{
    config.validate()?;
    let codec = config.build_codec()?;
    let options = config.run_options();
    let spec = config.window_spec()?;
    let pool = WorkerPool::acquire(options.worker_count)?;

    let start_overall = Instant::now();
    let mut results = EventResults::new();
    for (label, interval) in events {
        let outcome = samples.interval(interval).and_then(|segment| {
            let plan = plan_with(segment.len(), &spec, options.trailing_windows)?;
            let estimator = CompressibilityEstimator::new(segment, codec.as_ref(), options.byte_order);
            run_on_pool(&pool, &plan, &estimator, &options.cancel)
        });

        match &outcome {
            Ok(series) => log::debug!("  - Event {:<16} | {} windows", label, series.len()),
            Err(err) => log::warn!("  - Event {:<16} | FAILED: {}", label, err),
        }
        results.insert(
            label.clone(),
            outcome.map(|series| series.offset_timestamps(interval.start)),
        );
    }

    log::info!(
        "Scored {} events ({} failed) in {:.2?}",
        results.len(),
        results.failed().count(),
        start_overall.elapsed()
    );
    Ok(results)
}
