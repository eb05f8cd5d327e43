//! # paramat-planner
//!
//! Partition planning for ParaMat's row-parallel execution.
//!
//! Given an iteration domain (typically the output-row indices of a matrix
//! operation) and a worker count, [`plan`] computes contiguous, disjoint
//! index ranges that cover the domain with balanced sizes. Every parallel
//! operation in `paramat-exec` uses the same plan, so partitioning behavior
//! is uniform across operations.
//!
//! # Balancing
//!
//! With `base = domain_size / worker_count` and
//! `remainder = domain_size % worker_count`, the first `remainder`
//! partitions get `base + 1` elements and the rest get `base`. When
//! `worker_count > domain_size` the plan holds exactly `domain_size` unit
//! partitions; a partition is never empty.
//!
//! # Example
//!
//! ```
//! use paramat_planner::plan;
//!
//! let parts = plan(10, 4);
//! assert_eq!(parts.len(), 4);
//! assert_eq!(parts[0].range(), 0..3); // remainder goes to the first ranges
//! assert_eq!(parts[1].range(), 3..6);
//! assert_eq!(parts[2].range(), 6..8);
//! assert_eq!(parts[3].range(), 8..10);
//! ```

#![deny(warnings)]

use std::ops::Range;

/// A contiguous `[start, end)` sub-range of a 0-based iteration domain.
///
/// Partitions are ephemeral values produced by [`plan`]; within one plan
/// they are ordered, pairwise disjoint, and together cover the whole domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Inclusive start index.
    pub start: usize,
    /// Exclusive end index.
    pub end: usize,
}

impl Partition {
    /// Number of indices covered by this partition. Always positive.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false`: [`plan`] never emits an empty partition.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The partition as a standard `Range` for iteration.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `[0, domain_size)` into at most `worker_count` balanced partitions.
///
/// A `worker_count` of zero is treated as one. A `domain_size` of zero
/// yields an empty plan.
///
/// # Example
///
/// ```
/// use paramat_planner::plan;
///
/// // More workers than rows: one unit partition per row.
/// let parts = plan(3, 8);
/// assert_eq!(parts.len(), 3);
/// assert!(parts.iter().all(|p| p.len() == 1));
/// ```
pub fn plan(domain_size: usize, worker_count: usize) -> Vec<Partition> {
    if domain_size == 0 {
        return Vec::new();
    }
    let workers = worker_count.max(1).min(domain_size);
    let base = domain_size / workers;
    let remainder = domain_size % workers;

    let mut partitions = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let size = if i < remainder { base + 1 } else { base };
        partitions.push(Partition {
            start,
            end: start + size,
        });
        start += size;
    }
    partitions
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_plan_covers_domain(domain in 1usize..2000, workers in 1usize..64) {
            let parts = plan(domain, workers);
            let total: usize = parts.iter().map(Partition::len).sum();
            prop_assert_eq!(total, domain);
        }

        #[test]
        fn prop_plan_ordered_and_disjoint(domain in 1usize..2000, workers in 1usize..64) {
            let parts = plan(domain, workers);
            let mut cursor = 0;
            for p in &parts {
                prop_assert_eq!(p.start, cursor);
                prop_assert!(p.start < p.end);
                cursor = p.end;
            }
            prop_assert_eq!(cursor, domain);
        }

        #[test]
        fn prop_plan_balanced(domain in 1usize..2000, workers in 1usize..64) {
            let parts = plan(domain, workers);
            let min = parts.iter().map(Partition::len).min().unwrap();
            let max = parts.iter().map(Partition::len).max().unwrap();
            prop_assert!(max - min <= 1, "sizes may differ by at most one");
        }

        #[test]
        fn prop_never_more_partitions_than_domain(domain in 1usize..2000, workers in 1usize..64) {
            let parts = plan(domain, workers);
            prop_assert!(parts.len() <= domain);
            prop_assert!(parts.len() <= workers.max(1));
        }
    }
}
