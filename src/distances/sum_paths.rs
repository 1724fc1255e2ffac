/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{bfs_sum, component_sum, Scratch, WorkerPool};
use crate::components::Components;
use crate::traits::RandomAccessGraph;
use crate::Error;
use dsi_progress_logger::ProgressLog;

/// The number of ordered pairs of distinct connected nodes and the sum of the
/// lengths of their shortest paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Totals {
    pub pairs: u64,
    pub path_lengths: u64,
}

impl Totals {
    pub fn new(pairs: u64, path_lengths: u64) -> Self {
        Self {
            pairs,
            path_lengths,
        }
    }

    /// Adds two totals, failing if either sum overflows.
    pub fn checked_add(self, other: Self) -> Result<Self, Error> {
        Ok(Self {
            pairs: self
                .pairs
                .checked_add(other.pairs)
                .ok_or(Error::Overflow { what: "pairs" })?,
            path_lengths: self
                .path_lengths
                .checked_add(other.path_lengths)
                .ok_or(Error::Overflow {
                    what: "path lengths",
                })?,
        })
    }

    /// Returns the average length of a shortest path, or zero if there are
    /// no pairs.
    pub fn average_length(&self) -> f64 {
        if self.pairs == 0 {
            0.0
        } else {
            self.path_lengths as f64 / self.pairs as f64
        }
    }
}

/// Configuration of [`sum_paths`].
///
/// # Examples
///
/// ```
/// use doublets::distances::SumPathsConfig;
///
/// let config = SumPathsConfig::default().num_threads(4).breakpoint(64);
/// assert_eq!(config.get_num_threads(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumPathsConfig {
    breakpoint: usize,
    num_threads: usize,
    sequential_floor: usize,
}

impl Default for SumPathsConfig {
    fn default() -> Self {
        Self {
            breakpoint: Self::DEFAULT_BREAKPOINT,
            num_threads: num_cpus::get(),
            sequential_floor: Self::DEFAULT_SEQUENTIAL_FLOOR,
        }
    }
}

impl SumPathsConfig {
    /// Components of at least this size have their sources spread over the
    /// workers; smaller ones are visited by a single worker.
    pub const DEFAULT_BREAKPOINT: usize = 32;
    /// If no component reaches this size, everything runs on the calling
    /// thread.
    pub const DEFAULT_SEQUENTIAL_FLOOR: usize = 128;

    /// Sets the size from which a component is visited by all workers.
    ///
    /// Values smaller than three are treated as three, as components with at
    /// most two nodes are always handled in closed form.
    pub fn breakpoint(mut self, breakpoint: usize) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Sets the number of worker threads; zero is treated as one.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Sets the size of the largest component below which the computation is
    /// single-threaded.
    pub fn sequential_floor(mut self, sequential_floor: usize) -> Self {
        self.sequential_floor = sequential_floor;
        self
    }

    pub fn get_breakpoint(&self) -> usize {
        self.breakpoint
    }

    pub fn get_num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn get_sequential_floor(&self) -> usize {
        self.sequential_floor
    }
}

/// Returns the number of ordered pairs of distinct connected nodes of a
/// symmetric graph and the sum of the lengths of their shortest paths.
///
/// The components must be those of the graph, as returned by
/// [`symm_components`](crate::components::symm_components). If the largest
/// component is smaller than the
/// [sequential floor](SumPathsConfig::sequential_floor), or if a single
/// thread is requested, all components are visited on the calling thread
/// and no pool is created. Otherwise, a pool of
/// [`SumPathsConfig::get_num_threads`] workers is created for the call; use
/// [`sum_paths_with_pool`] to reuse a pool across calls.
///
/// # Examples
///
/// ```
/// use dsi_progress_logger::no_logging;
/// use doublets::prelude::*;
///
/// let graph = families::path(4);
/// let components = symm_components(&graph, no_logging![]);
/// let totals = sum_paths(&graph, &components, &SumPathsConfig::default(), no_logging![])?;
/// assert_eq!(totals, Totals::new(12, 20));
/// # Ok::<(), doublets::Error>(())
/// ```
pub fn sum_paths(
    graph: impl RandomAccessGraph + Sync,
    components: &Components,
    config: &SumPathsConfig,
    pl: &mut impl ProgressLog,
) -> Result<Totals, Error> {
    if components.largest() < config.sequential_floor || config.num_threads <= 1 {
        let mut scratch = Scratch::new(graph.num_nodes(), components.largest());
        return Ok(Totals::new(
            count_pairs(components)?,
            sequential(&graph, components, &mut scratch, pl)?,
        ));
    }
    let mut pool = WorkerPool::new(
        config.num_threads,
        graph.num_nodes(),
        components.largest(),
    )?;
    sum_paths_with_pool(graph, components, config, &mut pool, pl)
}

/// Same as [`sum_paths`], but uses the given pool.
///
/// The number of threads of `config` is ignored in favor of the number of
/// workers of the pool.
///
/// Components are scanned in the order of [`Components`], that is, by
/// decreasing size, and handled in three phases:
///
/// 1. components with at least [`breakpoint`](SumPathsConfig::breakpoint)
///    nodes are processed one at a time, with their sources spread over the
///    workers;
///
/// 2. components with more than two nodes and less than the breakpoint are
///    processed in batch, each by a single worker;
///
/// 3. components with one or two nodes are accounted in closed form.
///
/// If the largest component is smaller than the
/// [sequential floor](SumPathsConfig::sequential_floor), or if the pool has
/// a single worker, all components are visited on the calling thread
/// instead, using the scratch space of the first worker. Both strategies
/// yield the same totals.
///
/// # Errors
///
/// [`Error::PoolTooSmall`] if the scratch spaces of the pool cannot hold
/// the largest component.
pub fn sum_paths_with_pool(
    graph: impl RandomAccessGraph + Sync,
    components: &Components,
    config: &SumPathsConfig,
    pool: &mut WorkerPool,
    pl: &mut impl ProgressLog,
) -> Result<Totals, Error> {
    if components.largest() > pool.capacity() {
        return Err(Error::PoolTooSmall {
            component: 0,
            size: components.largest(),
            capacity: pool.capacity(),
        });
    }
    let pairs = count_pairs(components)?;

    let path_lengths = if components.largest() < config.sequential_floor || pool.num_workers() == 1
    {
        sequential(&graph, components, pool.scratch_mut(), pl)?
    } else {
        parallel(&graph, components, config.breakpoint.max(3), pool, pl)?
    };

    Ok(Totals::new(pairs, path_lengths))
}

/// Sums `s · (s − 1)` over the component sizes `s`.
fn count_pairs(components: &Components) -> Result<u64, Error> {
    let mut pairs = 0_u64;
    for &size in components.compute_sizes().iter() {
        let size = size as u64;
        pairs = size
            .checked_mul(size.saturating_sub(1))
            .and_then(|p| pairs.checked_add(p))
            .ok_or(Error::Overflow { what: "pairs" })?;
    }
    Ok(pairs)
}

fn sequential(
    graph: &(impl RandomAccessGraph + Sync),
    components: &Components,
    scratch: &mut Scratch,
    pl: &mut impl ProgressLog,
) -> Result<u64, Error> {
    log::info!(
        "Visiting {} components on a single thread",
        components.num_components()
    );
    pl.item_name("component");
    pl.expected_updates(Some(components.num_components()));
    pl.start("Summing path lengths...");

    let mut path_lengths = 0_u64;
    for members in components.iter() {
        path_lengths = path_lengths
            .checked_add(component_sum(graph, members, scratch)?)
            .ok_or(Error::Overflow {
                what: "path lengths",
            })?;
        pl.light_update();
    }

    pl.done();
    Ok(path_lengths)
}

fn parallel(
    graph: &(impl RandomAccessGraph + Sync),
    components: &Components,
    breakpoint: usize,
    pool: &mut WorkerPool,
    pl: &mut impl ProgressLog,
) -> Result<u64, Error> {
    let num_components = components.num_components();
    let large_end = components
        .iter()
        .position(|members| members.len() < breakpoint)
        .unwrap_or(num_components);
    let medium_end = large_end
        + components
            .iter()
            .skip(large_end)
            .position(|members| members.len() <= 2)
            .unwrap_or(num_components - large_end);

    let add = |sum: u64, value: u64| {
        sum.checked_add(value).ok_or(Error::Overflow {
            what: "path lengths",
        })
    };
    let mut path_lengths = 0_u64;

    let num_sources: usize = components.iter().take(large_end).map(<[_]>::len).sum();
    log::info!(
        "Phase 1: {} components with at least {} nodes ({} sources)",
        large_end,
        breakpoint,
        num_sources
    );
    pl.item_name("source");
    pl.expected_updates(Some(num_sources));
    pl.start("Visiting large components...");
    for members in components.iter().take(large_end) {
        let sum = pool.run(
            members.len(),
            members.iter().copied(),
            |scratch, source| bfs_sum(graph, members, source, scratch),
            pl,
        )?;
        path_lengths = add(path_lengths, sum)?;
    }
    pl.done();

    log::info!(
        "Phase 2: {} components with more than 2 and less than {} nodes",
        medium_end - large_end,
        breakpoint
    );
    pl.item_name("component");
    pl.expected_updates(Some(medium_end - large_end));
    pl.start("Visiting medium components...");
    let num_workers = pool.num_workers();
    let sum = pool.run(
        num_workers,
        large_end..medium_end,
        |scratch, component| component_sum(graph, components.members(component), scratch),
        pl,
    )?;
    path_lengths = add(path_lengths, sum)?;
    pl.done();

    log::info!(
        "Phase 3: {} components with at most 2 nodes",
        num_components - medium_end
    );
    for component in medium_end..num_components {
        match components.size(component) {
            1 => {}
            2 => path_lengths = add(path_lengths, 2)?,
            size => return Err(Error::TrivialPhaseOversized { component, size }),
        }
    }

    Ok(path_lengths)
}
