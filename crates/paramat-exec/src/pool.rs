//! Fixed-size worker pool with blocking ranged dispatch.
//!
//! The pool owns a set of long-lived worker threads fed from a single task
//! channel. [`WorkerPool::dispatch`] splits an index domain into partitions
//! (one task per partition), blocks the calling thread on a completion
//! latch, and propagates the first observed failure only after every task
//! has finished. Between dispatches the pool is idle and reusable; it holds
//! no matrix data of its own.
//!
//! # Failure semantics
//!
//! A failing or panicking task never tears down the dispatch early: the
//! latch is counted down exactly once per task, so `dispatch` returns only
//! once no worker can still reference call-scoped state. Panics are caught
//! and surfaced as [`MatrixError::WorkerFailure`].

use crossbeam_channel::{unbounded, Receiver, Sender};
use paramat_core::{MatrixError, Result};
use paramat_planner::plan;
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::ops::Range;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Per-dispatch completion barrier.
struct Latch {
    remaining: Mutex<usize>,
    done: Condvar,
}

impl Latch {
    fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            done: Condvar::new(),
        }
    }

    fn count_down(&self) {
        let mut remaining = self.remaining.lock();
        *remaining -= 1;
        if *remaining == 0 {
            self.done.notify_all();
        }
    }

    fn wait(&self) {
        let mut remaining = self.remaining.lock();
        while *remaining > 0 {
            self.done.wait(&mut remaining);
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    dispatches: AtomicU64,
    tasks_executed: AtomicU64,
    tasks_failed: AtomicU64,
}

/// Snapshot of pool activity counters.
///
/// Useful for asserting scheduling behavior in tests, e.g. that a
/// shape-mismatched operation reached the pool zero times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Number of `dispatch` calls that submitted work.
    pub dispatches: u64,
    /// Number of partition tasks run to completion (including failed ones).
    pub tasks_executed: u64,
    /// Number of partition tasks that returned an error or panicked.
    pub tasks_failed: u64,
}

/// A fixed set of worker threads executing ranged work units.
///
/// The thread count is chosen at construction and never changes. The pool is
/// an explicitly-owned resource: construct it once, pass it by reference to
/// operations, and let `Drop` join the workers deterministically.
///
/// # Examples
///
/// ```
/// use paramat_exec::WorkerPool;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let pool = WorkerPool::new(4);
/// let visited = AtomicUsize::new(0);
///
/// pool.dispatch(100, |range| {
///     visited.fetch_add(range.len(), Ordering::Relaxed);
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(visited.load(Ordering::Relaxed), 100);
/// ```
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    threads: usize,
    counters: Arc<Counters>,
}

impl WorkerPool {
    /// Create a pool with the given number of worker threads.
    ///
    /// A count of zero is clamped to one.
    ///
    /// # Panics
    ///
    /// Panics if the operating system refuses to spawn a worker thread.
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let (sender, receiver) = unbounded::<Job>();

        let mut workers = Vec::with_capacity(threads);
        for id in 0..threads {
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("paramat-worker-{id}"))
                .spawn(move || worker_loop(receiver))
                .expect("failed to spawn worker thread");
            workers.push(handle);
        }

        Self {
            sender: Some(sender),
            workers,
            threads,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Create a pool sized to the available hardware parallelism.
    pub fn with_default_threads() -> Self {
        Self::new(num_cpus::get())
    }

    /// Number of worker threads. Fixed for the pool's lifetime.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            dispatches: self.counters.dispatches.load(Ordering::Relaxed),
            tasks_executed: self.counters.tasks_executed.load(Ordering::Relaxed),
            tasks_failed: self.counters.tasks_failed.load(Ordering::Relaxed),
        }
    }

    /// Run `work_fn` once per planned partition of `[0, domain_size)` and
    /// block until every task has completed.
    ///
    /// `work_fn` must confine its writes to caller-owned state implied by
    /// its own range; ranges of one dispatch are disjoint by construction.
    /// If any task fails, the remaining tasks still run to completion and
    /// the first recorded failure is returned.
    ///
    /// A `domain_size` of zero is a no-op.
    pub fn dispatch<F>(&self, domain_size: usize, work_fn: F) -> Result<()>
    where
        F: Fn(Range<usize>) -> Result<()> + Send + Sync,
    {
        if domain_size == 0 {
            return Ok(());
        }
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| MatrixError::worker("worker pool is shut down"))?;

        let partitions = plan(domain_size, self.threads);
        self.counters.dispatches.fetch_add(1, Ordering::Relaxed);

        let latch = Latch::new(partitions.len());
        let first_error: Mutex<Option<MatrixError>> = Mutex::new(None);
        let work_fn = &work_fn;

        for partition in &partitions {
            let range = partition.range();
            let counters = Arc::clone(&self.counters);
            let latch_ref = &latch;
            let error_ref = &first_error;

            let job: Box<dyn FnOnce() + Send + '_> = Box::new(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| work_fn(range)));
                let failure = match outcome {
                    Ok(Ok(())) => None,
                    Ok(Err(err)) => Some(err),
                    Err(panic) => Some(MatrixError::worker(panic_reason(panic.as_ref()))),
                };
                if let Some(err) = failure {
                    counters.tasks_failed.fetch_add(1, Ordering::Relaxed);
                    let mut slot = error_ref.lock();
                    if slot.is_none() {
                        *slot = Some(err);
                    }
                }
                counters.tasks_executed.fetch_add(1, Ordering::Relaxed);
                latch_ref.count_down();
            });
            // Safety: `dispatch` blocks on the latch below before returning,
            // and the latch is counted down only after the job has finished,
            // so every borrow captured by the job outlives its execution.
            let job: Job = unsafe {
                std::mem::transmute::<Box<dyn FnOnce() + Send + '_>, Job>(job)
            };
            if let Err(rejected) = sender.send(job) {
                // Channel closed mid-dispatch cannot normally happen while a
                // shared reference exists; run the task inline so the latch
                // accounting stays intact.
                (rejected.into_inner())();
            }
        }

        latch.wait();
        match first_error.into_inner() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the channel lets every idle worker observe disconnect.
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn worker_loop(receiver: Receiver<Job>) {
    while let Ok(job) = receiver.recv() {
        job();
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("worker panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("worker panicked: {message}")
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_dispatch_covers_every_index_once() {
        let pool = WorkerPool::new(4);
        let marks: Vec<AtomicUsize> = (0..97).map(|_| AtomicUsize::new(0)).collect();

        pool.dispatch(97, |range| {
            for i in range {
                marks[i].fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        })
        .unwrap();

        for (i, mark) in marks.iter().enumerate() {
            assert_eq!(mark.load(Ordering::Relaxed), 1, "index {i} visited once");
        }
    }

    #[test]
    fn test_pool_is_reusable_across_dispatches() {
        let pool = WorkerPool::new(2);
        let total = AtomicUsize::new(0);

        for _ in 0..3 {
            pool.dispatch(10, |range| {
                total.fetch_add(range.len(), Ordering::Relaxed);
                Ok(())
            })
            .unwrap();
        }

        assert_eq!(total.load(Ordering::Relaxed), 30);
        assert_eq!(pool.stats().dispatches, 3);
    }

    #[test]
    fn test_first_failure_is_propagated_after_all_tasks_finish() {
        let pool = WorkerPool::new(4);
        let executed = AtomicUsize::new(0);

        let err = pool
            .dispatch(8, |range| {
                executed.fetch_add(1, Ordering::Relaxed);
                if range.contains(&0) {
                    Err(MatrixError::worker("range zero failed"))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();

        assert!(matches!(err, MatrixError::WorkerFailure { .. }));
        // Every partition task ran despite the failure: plan(8, 4) = 4 tasks.
        assert_eq!(executed.load(Ordering::Relaxed), 4);
        let stats = pool.stats();
        assert_eq!(stats.tasks_executed, 4);
        assert_eq!(stats.tasks_failed, 1);
    }

    #[test]
    fn test_panic_becomes_worker_failure() {
        let pool = WorkerPool::new(2);

        let err = pool
            .dispatch(4, |range| {
                if range.contains(&0) {
                    panic!("boom");
                }
                Ok(())
            })
            .unwrap_err();

        match err {
            MatrixError::WorkerFailure { reason } => {
                assert!(reason.contains("boom"), "reason was: {reason}");
            }
            other => panic!("expected WorkerFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_domain_is_noop() {
        let pool = WorkerPool::new(4);
        pool.dispatch(0, |_range| Ok(())).unwrap();
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[test]
    fn test_zero_threads_clamped_to_one() {
        let pool = WorkerPool::new(0);
        assert_eq!(pool.threads(), 1);

        let total = AtomicUsize::new(0);
        pool.dispatch(5, |range| {
            total.fetch_add(range.len(), Ordering::Relaxed);
            Ok(())
        })
        .unwrap();
        assert_eq!(total.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_more_workers_than_domain() {
        let pool = WorkerPool::new(16);
        let total = AtomicUsize::new(0);

        pool.dispatch(3, |range| {
            assert_eq!(range.len(), 1);
            total.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
        .unwrap();

        assert_eq!(total.load(Ordering::Relaxed), 3);
        assert_eq!(pool.stats().tasks_executed, 3);
    }

    #[test]
    fn test_drop_joins_workers() {
        // Dropping a busy-free pool must not hang.
        let pool = WorkerPool::new(4);
        pool.dispatch(10, |_range| Ok(())).unwrap();
        drop(pool);
    }
}
