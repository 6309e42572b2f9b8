// In: src/window_pipeline/scheduler.rs

//! The Parallel Scheduler.
//!
//! Fans every window of a plan out across a `WorkerPool` and re-sequences the
//! results by plan index. Each window owns exactly one slot of the result
//! buffer, fixed at dispatch time, so workers never contend for a slot no
//! matter in which order they finish.
//!
//! The run is all-or-nothing: the first failing window aborts the remaining
//! work and the error is returned with that window's index and timestamp
//! attached. A partial series is never returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use rayon::prelude::*;

use crate::error::{CompressibilityError, Result};
use crate::types::{CompressibilitySample, CompressibilitySeries};
use crate::window_pipeline::cancel::CancellationToken;
use crate::window_pipeline::estimator::WindowScorer;
use crate::window_pipeline::planner::WindowPlan;
use crate::window_pipeline::pool::WorkerPool;

/// Scores every window of `plan` on `pool`, returning ratios in plan order.
pub fn run_on_pool<S>(
    pool: &WorkerPool,
    plan: &WindowPlan,
    scorer: &S,
    cancel: &CancellationToken,
) -> Result<CompressibilitySeries>
where
    S: WindowScorer + ?Sized,
{
    let total = plan.len();
    if total == 0 {
        return Ok(CompressibilitySeries::default());
    }

    let start_overall = Instant::now();
    let mut slots: Vec<Option<f64>> = vec![None; total];
    let abort = AtomicBool::new(false);
    let first_failure: Mutex<Option<(usize, CompressibilityError)>> = Mutex::new(None);

    pool.install(|| {
        slots
            .par_iter_mut()
            .zip(plan.windows().par_iter())
            .for_each_init(Vec::new, |scratch, (slot, window)| {
                if abort.load(Ordering::Relaxed) {
                    return;
                }
                if cancel.is_cancelled() {
                    abort.store(true, Ordering::Relaxed);
                    return;
                }
                match scorer.score_window(window, scratch) {
                    Ok(ratio) => *slot = Some(ratio),
                    Err(err) => {
                        abort.store(true, Ordering::Relaxed);
                        let mut failure = first_failure
                            .lock()
                            .unwrap_or_else(|poisoned| poisoned.into_inner());
                        // Keep the earliest window in plan order.
                        if failure.as_ref().map_or(true, |(idx, _)| window.index < *idx) {
                            *failure = Some((window.index, err));
                        }
                    }
                }
            });
    });

    let failure = first_failure
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some((window_index, source)) = failure {
        let timestamp = plan.get(window_index).map_or(0, |w| w.timestamp);
        log::warn!(
            "Run aborted at window {} (timestamp {}): {}",
            window_index,
            timestamp,
            source
        );
        return Err(CompressibilityError::WorkerFailure {
            window_index,
            timestamp,
            source: Box::new(source),
        });
    }

    let scored = slots.iter().filter(|slot| slot.is_some()).count();
    if scored < total {
        log::warn!("Run cancelled after {} of {} windows", scored, total);
        return Err(CompressibilityError::Cancelled { scored, total });
    }

    let series: CompressibilitySeries = slots
        .into_iter()
        .zip(plan.windows())
        .filter_map(|(ratio, window)| {
            ratio.map(|ratio| CompressibilitySample {
                ratio,
                timestamp: window.timestamp,
            })
        })
        .collect();

    log::info!(
        "Scored {} windows on {} workers in {:.2?}",
        series.len(),
        pool.num_workers(),
        start_overall.elapsed()
    );

    Ok(series)
}
