//! Splitting a linear sequence of work items across a fixed number of workers.
//!
//! With 5 workers and 12 items:
//!
//! ```text
//! Item:        | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 | 11 |
//! Contiguous:  |     0     |     1     |   2   |   3   |    4    |
//! Striped:     | 0 | 1 | 2 | 3 | 4 | 0 | 1 | 2 | 3 | 4 | 0  | 1  |
//! ```

use std::iter::{Skip, StepBy};
use std::ops::Range;

use log::debug;

use crate::error::{Result, TileError};

/// A validated `(rank, size)` pair with `rank < size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerRank {
    rank: usize,
    size: usize,
}

impl WorkerRank {
    pub fn new(rank: usize, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(TileError::InvalidWorkerCount);
        }
        if rank >= size {
            return Err(TileError::RankOutOfRange { rank, size });
        }
        Ok(Self { rank, size })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Strategy for assigning items to workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionStrategy {
    /// One run of consecutive items per worker; the first `len % size`
    /// workers take one extra item
    #[default]
    Contiguous,

    /// Worker `rank` takes items `rank, rank + size, rank + 2 * size, ...`
    Striped,
}

impl PartitionStrategy {
    /// Collect the items of `iterable` owned by `worker`.
    pub fn partition<I>(&self, iterable: I, worker: WorkerRank) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        match self {
            PartitionStrategy::Contiguous => contiguous(iterable, worker),
            PartitionStrategy::Striped => striped(iterable, worker).collect(),
        }
    }
}

/// Bounds of the contiguous run owned by `worker` in a sequence of `len` items.
pub fn contiguous_range(len: usize, worker: WorkerRank) -> Range<usize> {
    let WorkerRank { rank, size } = worker;
    let base = len / size;
    let remainder = len % size;
    if rank < remainder {
        let start = (base + 1) * rank;
        start..start + base + 1
    } else {
        let start = remainder * (base + 1) + (rank - remainder) * base;
        start..start + base
    }
}

fn contiguous<I: IntoIterator>(iterable: I, worker: WorkerRank) -> Vec<I::Item> {
    // the length is needed up front, so the whole sequence is drained
    let mut items: Vec<I::Item> = iterable.into_iter().collect();
    let range = contiguous_range(items.len(), worker);
    debug!(
        "contiguous partition: rank {} of {} owns {:?} of {} items",
        worker.rank,
        worker.size,
        range,
        items.len()
    );
    items.truncate(range.end);
    items.drain(..range.start);
    items
}

/// Lazy striped view over an iterator.
pub type Striped<I> = StepBy<Skip<I>>;

fn striped<I: IntoIterator>(iterable: I, worker: WorkerRank) -> Striped<I::IntoIter> {
    debug!("striped partition: rank {} of {}", worker.rank, worker.size);
    iterable.into_iter().skip(worker.rank).step_by(worker.size)
}

/// Items of `iterable` owned by `rank` under a contiguous split over `size` workers.
///
/// The input is fully drained before slicing.
pub fn partition_contiguous<I>(iterable: I, rank: usize, size: usize) -> Result<Vec<I::Item>>
where
    I: IntoIterator,
{
    let worker = WorkerRank::new(rank, size)?;
    Ok(contiguous(iterable, worker))
}

/// Items of `iterable` owned by `rank` under a striped split over `size` workers.
///
/// Nothing is consumed until the result is polled, and unbounded inputs are fine.
pub fn partition_striped<I>(iterable: I, rank: usize, size: usize) -> Result<Striped<I::IntoIter>>
where
    I: IntoIterator,
{
    let worker = WorkerRank::new(rank, size)?;
    Ok(striped(iterable, worker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::Cell;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn validation() {
        init();
        for (rank, size) in [(0, 0), (5, 5), (6, 5)] {
            let err = partition_contiguous(0..12, rank, size).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigMismatch);
            assert!(partition_striped(0..12, rank, size).is_err());
        }
        assert_eq!(
            WorkerRank::new(5, 5),
            Err(TileError::RankOutOfRange { rank: 5, size: 5 })
        );
        assert_eq!(WorkerRank::new(0, 0), Err(TileError::InvalidWorkerCount));
    }

    #[test]
    fn contiguous_empty() {
        for rank in 0..5 {
            assert!(partition_contiguous(0..0, rank, 5).unwrap().is_empty());
        }
    }

    #[test]
    fn contiguous_single_worker() {
        assert_eq!(
            partition_contiguous(0..12, 0, 1).unwrap(),
            (0..12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn contiguous_no_remainder() {
        assert_eq!(partition_contiguous(0..12, 0, 3).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(partition_contiguous(0..12, 1, 3).unwrap(), vec![4, 5, 6, 7]);
        assert_eq!(partition_contiguous(0..12, 2, 3).unwrap(), vec![8, 9, 10, 11]);
    }

    #[test]
    fn contiguous_remainder() {
        assert_eq!(partition_contiguous(0..12, 0, 5).unwrap(), vec![0, 1, 2]);
        assert_eq!(partition_contiguous(0..12, 1, 5).unwrap(), vec![3, 4, 5]);
        assert_eq!(partition_contiguous(0..12, 2, 5).unwrap(), vec![6, 7]);
        assert_eq!(partition_contiguous(0..12, 3, 5).unwrap(), vec![8, 9]);
        assert_eq!(partition_contiguous(0..12, 4, 5).unwrap(), vec![10, 11]);
    }

    #[test]
    fn contiguous_drains_one_pass_input() {
        let pulled = Cell::new(0);
        let source = (0..12).inspect(|_| pulled.set(pulled.get() + 1));
        assert_eq!(partition_contiguous(source, 0, 5).unwrap(), vec![0, 1, 2]);
        assert_eq!(pulled.get(), 12);
    }

    #[test]
    fn striped_empty() {
        for rank in 0..5 {
            assert_eq!(partition_striped(0..0, rank, 5).unwrap().count(), 0);
        }
    }

    #[test]
    fn striped_single_worker() {
        assert!(partition_striped(0..12, 0, 1).unwrap().eq(0..12));
    }

    #[test]
    fn striped_no_remainder() {
        let part = |rank| partition_striped(0..12, rank, 3).unwrap().collect::<Vec<_>>();
        assert_eq!(part(0), vec![0, 3, 6, 9]);
        assert_eq!(part(1), vec![1, 4, 7, 10]);
        assert_eq!(part(2), vec![2, 5, 8, 11]);
    }

    #[test]
    fn striped_remainder() {
        let part = |rank| partition_striped(0..12, rank, 5).unwrap().collect::<Vec<_>>();
        assert_eq!(part(0), vec![0, 5, 10]);
        assert_eq!(part(1), vec![1, 6, 11]);
        assert_eq!(part(2), vec![2, 7]);
        assert_eq!(part(3), vec![3, 8]);
        assert_eq!(part(4), vec![4, 9]);
    }

    #[test]
    fn striped_is_lazy_and_handles_unbounded_input() {
        let pulled = Cell::new(0);
        let source = (0..).inspect(|_| pulled.set(pulled.get() + 1));
        let mut part = partition_striped(source, 2, 4).unwrap();
        assert_eq!(pulled.get(), 0);
        assert_eq!(part.next(), Some(2));
        assert_eq!(part.next(), Some(6));
        assert_eq!(pulled.get(), 7);
    }

    #[test]
    fn strategies_cover_every_item_once() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let len = rng.random_range(0..40);
            let size = rng.random_range(1..8);
            for strategy in [PartitionStrategy::Contiguous, PartitionStrategy::Striped] {
                let mut all = Vec::new();
                let mut lens = Vec::new();
                for rank in 0..size {
                    let worker = WorkerRank::new(rank, size).unwrap();
                    let part = strategy.partition(0..len, worker);
                    lens.push(part.len());
                    all.extend(part);
                }
                all.sort_unstable();
                assert_eq!(all, (0..len).collect::<Vec<_>>());
                // sizes differ by at most one, larger shares first
                assert!(lens.windows(2).all(|w| w[0] >= w[1] && w[0] - w[1] <= 1));
            }
        }
    }

    #[test]
    fn contiguous_range_matches_closed_form() {
        let lens: Vec<usize> = (0..5)
            .map(|rank| contiguous_range(12, WorkerRank::new(rank, 5).unwrap()).len())
            .collect();
        assert_eq!(lens, vec![3, 3, 2, 2, 2]);
        assert_eq!(contiguous_range(12, WorkerRank::new(2, 5).unwrap()), 6..8);
    }
}
