//! The worker pool shared by every window of a run.
//!
//! A pool is acquired at the start of a run and released when the
//! `WorkerPool` is dropped, on every exit path. Rayon's work-stealing pool
//! is reused across all windows instead of spawning a thread per window.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{CompressibilityError, Result};

#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Builds a pool of `worker_count` threads, or one per available core when `None`.
    pub fn acquire(worker_count: Option<usize>) -> Result<Self> {
        let num_threads = match worker_count {
            Some(0) => {
                return Err(CompressibilityError::ResourceExhausted(
                    "a worker pool needs at least one worker".to_string(),
                ))
            }
            Some(n) => n,
            None => hardware_concurrency(),
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("compressibility-worker-{i}"))
            .build()?;

        log::debug!("Acquired worker pool with {} threads", num_threads);
        Ok(Self { pool })
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` inside the pool; parallel iterators started by `op` use its workers.
    pub(crate) fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

/// Number of hardware threads, falling back to one when it cannot be queried.
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
