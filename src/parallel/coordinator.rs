//! Distributed reproduction contract.

use crate::error::Result;

/// Splits reproduction work across cooperating workers and merges the
/// offspring back into one ordered sequence.
///
/// Every worker in a group runs the same generational loop in lockstep.
/// [`merge`](Coordinator::merge) is the only blocking point: it returns once
/// every worker has contributed, and all workers receive the same sequence.
pub trait Coordinator<C> {
    /// This worker's index in the group, `0..size()`.
    fn rank(&self) -> usize {
        0
    }

    /// Number of workers in the group.
    fn size(&self) -> usize {
        1
    }

    /// Whether this worker coordinates the group (logs failures).
    fn is_master(&self) -> bool {
        self.rank() == 0
    }

    /// This worker's fair share of `n` units.
    fn split(&self, n: usize) -> usize {
        fair_share(n, self.size(), self.rank())
    }

    /// Gathers every worker's local sequence in rank order, then local order.
    fn merge(&self, local: Vec<C>) -> Result<Vec<C>>;
}

/// Share of `n` units for `rank` in a group of `workers`.
///
/// The first `n % workers` ranks take one extra unit, so shares differ by at
/// most one and sum to `n`. Returns 0 when `workers` is 0.
pub fn fair_share(n: usize, workers: usize, rank: usize) -> usize {
    if workers == 0 || rank >= workers {
        return 0;
    }
    n / workers + usize::from(rank < n % workers)
}

/// Shares of `n` units for every rank of a group of `workers`.
///
/// ```
/// use u_evolve::parallel::split_counts;
///
/// assert_eq!(split_counts(10, 4), vec![3, 3, 2, 2]);
/// ```
pub fn split_counts(n: usize, workers: usize) -> Vec<usize> {
    (0..workers).map(|rank| fair_share(n, workers, rank)).collect()
}

/// The degenerate single-worker group: `split(n) = n`, `merge(seq) = seq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleProcess;

impl<C> Coordinator<C> for SingleProcess {
    fn split(&self, n: usize) -> usize {
        n
    }

    fn merge(&self, local: Vec<C>) -> Result<Vec<C>> {
        Ok(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_process_is_identity() {
        let c = SingleProcess;
        assert_eq!(Coordinator::<u8>::split(&c, 17), 17);
        assert_eq!(c.merge(vec![1, 2, 3]).unwrap(), vec![1, 2, 3]);
        assert!(Coordinator::<u8>::is_master(&c));
    }

    #[test]
    fn test_split_counts_examples() {
        assert_eq!(split_counts(0, 3), vec![0, 0, 0]);
        assert_eq!(split_counts(5, 1), vec![5]);
        assert_eq!(split_counts(2, 4), vec![1, 1, 0, 0]);
        assert!(split_counts(5, 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_split_is_fair_and_exact(n in 0usize..10_000, workers in 1usize..64) {
            let shares = split_counts(n, workers);
            prop_assert_eq!(shares.len(), workers);
            prop_assert_eq!(shares.iter().sum::<usize>(), n);
            let max = *shares.iter().max().unwrap();
            let min = *shares.iter().min().unwrap();
            prop_assert!(max - min <= 1);
        }
    }
}
