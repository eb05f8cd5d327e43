//! Execution tuning hints.
//!
//! Hints are advisory knobs that steer scheduling without changing results:
//! any operation produces the same output whether it runs inline or on the
//! pool.

/// Output sizes below this run inline on the calling thread.
///
/// For small matrices the cost of waking workers and synchronizing on the
/// completion latch dwarfs the arithmetic itself.
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 4096;

/// Tuning hints consulted by every parallel operation.
///
/// # Examples
///
/// ```
/// use paramat_exec::ExecHints;
///
/// // Force the parallel path even for tiny outputs.
/// let hints = ExecHints::new().with_sequential_threshold(0);
/// assert_eq!(hints.sequential_threshold, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecHints {
    /// Minimum number of output elements before work is sent to the pool.
    pub sequential_threshold: usize,
}

impl Default for ExecHints {
    fn default() -> Self {
        Self {
            sequential_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
        }
    }
}

impl ExecHints {
    /// Create hints with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sequential fallback threshold (in output elements).
    pub fn with_sequential_threshold(mut self, threshold: usize) -> Self {
        self.sequential_threshold = threshold;
        self
    }
}
