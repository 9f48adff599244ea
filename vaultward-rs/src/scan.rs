//! Bounded parallel map over vault files.
//!
//! Scans run on a rayon pool with no more threads than jobs. Collecting into
//! a `Vec` keeps input order, so output never depends on scheduling.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use std::thread;

/// Number of workers for `jobs` items: one per core, never more than the
/// job count, and at least one.
pub fn worker_count(jobs: usize) -> usize {
    let cores = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    cores.min(jobs).max(1)
}

/// Apply `f` to every item in parallel and return the `Some` results in
/// input order.
pub fn parallel_map<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Option<R> + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }

    let workers = worker_count(items.len());
    tracing::trace!(jobs = items.len(), workers, "starting parallel scan");

    let scan = || items.par_iter().filter_map(&f).collect::<Vec<R>>();
    match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(scan),
        Err(e) => {
            tracing::debug!(error = %e, "falling back to the global rayon pool");
            scan()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        let out: Vec<i32> = parallel_map(&[] as &[i32], |x| Some(*x));
        assert!(out.is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let items: Vec<usize> = (0..500).collect();
        let out = parallel_map(&items, |x| Some(x * 2));
        assert_eq!(out, items.iter().map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_none_results_are_dropped() {
        let items: Vec<u32> = (1..=10).collect();
        let out = parallel_map(&items, |x| (x % 2 == 0).then_some(*x));
        assert_eq!(out, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_runs_inside_sized_pool() {
        let items: Vec<u8> = vec![1, 2, 3];
        let threads = parallel_map(&items, |_| Some(rayon::current_num_threads()));
        assert!(threads.iter().all(|n| *n <= worker_count(items.len())));
    }

    #[test]
    fn test_worker_count_bounds() {
        assert_eq!(worker_count(0), 1);
        assert_eq!(worker_count(1), 1);
        assert!(worker_count(1000) >= 1);
        assert!(worker_count(3) <= 3);
    }
}
