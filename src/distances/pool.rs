/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Scratch;
use crate::Error;
use dsi_progress_logger::ProgressLog;

/// A fixed set of workers, each owning a [`Scratch`] space.
///
/// The workers run on a [Rayon](rayon) thread pool built once. The scratch
/// spaces are allocated when the pool is created and reused by every
/// [`run`](WorkerPool::run), so no per-task allocation happens.
pub struct WorkerPool {
    thread_pool: rayon::ThreadPool,
    scratch: Vec<Scratch>,
}

impl WorkerPool {
    /// Creates a pool of `num_threads` workers able to visit components with
    /// at most `capacity` nodes of a graph with `num_nodes` nodes.
    ///
    /// A request for zero threads is treated as a request for one thread.
    pub fn new(num_threads: usize, num_nodes: usize, capacity: usize) -> Result<Self, Error> {
        let num_threads = num_threads.max(1);
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("doublets-worker-{}", i))
            .build()
            .map_err(|source| Error::ThreadPool {
                num_threads,
                source,
            })?;
        log::debug!(
            "Allocating {} scratch spaces for {} nodes and components of up to {} nodes",
            num_threads,
            num_nodes,
            capacity
        );
        Ok(Self {
            thread_pool,
            scratch: (0..num_threads)
                .map(|_| Scratch::new(num_nodes, capacity))
                .collect(),
        })
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.scratch.len()
    }

    /// Returns the scratch space of the first worker, for single-threaded
    /// computations on the calling thread.
    pub fn scratch_mut(&mut self) -> &mut Scratch {
        &mut self.scratch[0]
    }

    /// Returns the maximum size of a component the workers can visit.
    pub fn capacity(&self) -> usize {
        self.scratch[0].capacity()
    }

    /// Runs `work` on every task using at most `max_workers` workers, and
    /// returns the sum of the results.
    ///
    /// A dispatcher thread feeds the tasks to the workers through a bounded
    /// channel and closes it after the last task. Meanwhile, the calling
    /// thread collects from a bounded result channel exactly as many results
    /// as there are tasks, reporting each of them to `pl` as a light update.
    ///
    /// # Errors
    ///
    /// The first error returned by `work`; [`Error::WorkerLost`] if a worker
    /// stops before all results are delivered (if it panicked, the panic is
    /// then propagated); [`Error::Overflow`] if the sum does not fit in a
    /// `u64`.
    pub fn run<T, I, W>(
        &mut self,
        max_workers: usize,
        tasks: I,
        work: W,
        pl: &mut impl ProgressLog,
    ) -> Result<u64, Error>
    where
        T: Send,
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator + Send,
        W: Fn(&mut Scratch, T) -> Result<u64, Error> + Sync,
    {
        let num_workers = max_workers.clamp(1, self.scratch.len());
        let Self {
            thread_pool,
            scratch: scratches,
        } = self;

        let tasks = tasks.into_iter();
        let expected = tasks.len();
        let (task_tx, task_rx) = crossbeam_channel::bounded::<T>(2 * num_workers);
        let (result_tx, result_rx) = crossbeam_channel::bounded(2 * num_workers);
        let work = &work;

        thread_pool.in_place_scope(|scope| {
            for scratch in scratches[..num_workers].iter_mut() {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move |_| {
                    for task in task_rx {
                        if result_tx.send(work(scratch, task)).is_err() {
                            break;
                        }
                    }
                });
            }
            // these are for the workers, we don't need them anymore
            drop(task_rx);
            drop(result_tx);

            // all threads of the pool are busy with the workers
            std::thread::scope(|s| {
                s.spawn(move || {
                    for task in tasks {
                        // fails only if all workers are gone
                        if task_tx.send(task).is_err() {
                            break;
                        }
                    }
                    // dropping task_tx closes the channel, so the workers
                    // will exit when done
                });
                harvest(result_rx, expected, pl)
            })
        })
    }
}

/// Sums `expected` results.
///
/// The receiver is consumed, so that on an early return the workers blocked
/// on a full result channel are released.
fn harvest(
    results: crossbeam_channel::Receiver<Result<u64, Error>>,
    expected: usize,
    pl: &mut impl ProgressLog,
) -> Result<u64, Error> {
    let mut sum = 0_u64;
    for received in 0..expected {
        let result = results
            .recv()
            .map_err(|_| Error::WorkerLost { received, expected })?;
        sum = sum.checked_add(result?).ok_or(Error::Overflow {
            what: "path lengths",
        })?;
        pl.light_update();
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsi_progress_logger::no_logging;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    #[test]
    fn test_run_sums_all_tasks() -> Result<(), Error> {
        let mut pool = WorkerPool::new(4, 0, 0)?;
        assert_eq!(pool.num_workers(), 4);
        let sum = pool.run(4, 1..1001_usize, |_, x| Ok(x as u64), no_logging![])?;
        assert_eq!(sum, 500_500);
        // The pool is reusable, also with fewer workers
        let sum = pool.run(2, 0..0_usize, |_, x| Ok(x as u64), no_logging![])?;
        assert_eq!(sum, 0);
        Ok(())
    }

    #[test]
    fn test_run_propagates_errors() -> Result<(), Error> {
        let mut pool = WorkerPool::new(3, 0, 0)?;
        let result = pool.run(
            3,
            0..100_usize,
            |_, x| {
                if x == 42 {
                    Err(Error::NoWords)
                } else {
                    Ok(1)
                }
            },
            no_logging![],
        );
        assert!(matches!(result, Err(Error::NoWords)));
        Ok(())
    }

    #[test]
    fn test_run_detects_overflow() -> Result<(), Error> {
        let mut pool = WorkerPool::new(2, 0, 0)?;
        let result = pool.run(2, [u64::MAX, 1], |_, x| Ok(x), no_logging![]);
        assert!(matches!(result, Err(Error::Overflow { .. })));
        Ok(())
    }

    #[test]
    fn test_results_harvested_during_dispatch() -> Result<(), Error> {
        let num_tasks = 20_000_usize;
        let done = AtomicUsize::new(0);
        let caught_up = AtomicBool::new(false);
        let tasks = (0..num_tasks).map(|task| {
            if task == num_tasks - 1 {
                // The result channel holds only a few results per worker, so
                // the workers can complete all previous tasks only if their
                // results are being collected
                let start = Instant::now();
                while done.load(Ordering::Relaxed) < num_tasks - 1
                    && start.elapsed() < Duration::from_secs(60)
                {
                    std::thread::sleep(Duration::from_millis(1));
                }
                caught_up.store(
                    done.load(Ordering::Relaxed) == num_tasks - 1,
                    Ordering::Relaxed,
                );
            }
            task
        });

        let mut pool = WorkerPool::new(4, 0, 0)?;
        let sum = pool.run(
            4,
            tasks,
            |_, task| {
                done.fetch_add(1, Ordering::Relaxed);
                Ok(task as u64)
            },
            no_logging![],
        )?;
        assert!(caught_up.load(Ordering::Relaxed));
        assert_eq!(sum, (num_tasks * (num_tasks - 1) / 2) as u64);
        Ok(())
    }

    #[test]
    fn test_early_error_releases_workers() -> Result<(), Error> {
        // The error arrives while most tasks are still to be dispatched
        let mut pool = WorkerPool::new(2, 0, 0)?;
        let result = pool.run(
            2,
            0..100_000_usize,
            |_, x| if x == 0 { Err(Error::NoWords) } else { Ok(1) },
            no_logging![],
        );
        assert!(matches!(result, Err(Error::NoWords)));
        // The pool is still usable
        assert_eq!(pool.run(2, 0..10_usize, |_, x| Ok(x as u64), no_logging![])?, 45);
        Ok(())
    }
}
