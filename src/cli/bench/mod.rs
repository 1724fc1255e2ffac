/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{pretty_print_elapsed, GlobalArgs, NumThreadsArg, SchedulerArgs};
use crate::graphs::families::{self, expected};
use crate::prelude::*;
use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use dsi_progress_logger::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
/// Families of graphs.
pub enum Family {
    /// A path.
    Path,
    /// A cycle (at least three nodes).
    Cycle,
    /// A complete graph.
    Complete,
    /// A star whose hub is the last node.
    Star,
    /// A wheel whose hub is the last node (at least four nodes).
    Wheel,
    /// A square lattice with the given side.
    Lattice,
    /// A complete bipartite graph with sides of the given size.
    Bipartite,
    /// An Erdös-Rényi random graph; totals are checked against a
    /// single-threaded run.
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "bench", about = "Benchmarks the summation of shortest-path lengths on a family of graphs.", long_about = None)]
pub struct CliArgs {
    /// The family of graphs.
    #[arg(value_enum)]
    pub family: Family,

    /// The number of nodes, or the side for lattices and bipartite graphs.
    pub size: usize,

    /// Number of repeats (usually to warm up the cache).
    #[arg(short = 'R', long, default_value_t = 1)]
    pub repeats: usize,

    /// The probability of an edge in random graphs.
    #[arg(short = 'p', long, default_value_t = 0.01)]
    pub probability: f64,

    /// The seed of random graphs.
    #[arg(short = 's', long, default_value_t = 0)]
    pub seed: u64,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,

    #[clap(flatten)]
    pub scheduler: SchedulerArgs,
}

/// Builds a graph of the given family, together with its totals if they
/// have a closed form.
pub fn build(args: &CliArgs) -> Result<(CsrGraph, Option<Totals>)> {
    let n = args.size;
    Ok(match args.family {
        Family::Path => (families::path(n), Some(expected::path(n))),
        Family::Cycle => {
            ensure!(n >= 3, "A cycle needs at least three nodes");
            (families::cycle(n), Some(expected::cycle(n)))
        }
        Family::Complete => (families::complete(n), Some(expected::complete(n))),
        Family::Star => (families::star(n), Some(expected::star(n))),
        Family::Wheel => {
            ensure!(n >= 4, "A wheel needs at least four nodes");
            (families::wheel(n), Some(expected::wheel(n)))
        }
        Family::Lattice => (families::lattice(n, n), Some(expected::lattice(n, n))),
        Family::Bipartite => (
            families::complete_bipartite(n, n),
            Some(expected::complete_bipartite(n, n)),
        ),
        Family::Random => {
            ensure!(
                (0.0..=1.0).contains(&args.probability),
                "The probability must be in [0..1]"
            );
            (
                ErdosRenyi::new(n, args.probability, args.seed).generate(),
                None,
            )
        }
    })
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let (graph, closed_form) = build(&args)?;
    log::info!(
        "Built a {:?} graph with {} nodes and {} edges",
        args.family,
        graph.num_nodes(),
        graph.num_edges()
    );

    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let components = symm_components(&graph, &mut pl);
    let config = args.scheduler.to_config(args.num_threads.num_threads);

    let expected = match closed_form {
        Some(totals) => totals,
        None => {
            log::info!("Computing reference totals on a single thread");
            sum_paths(&graph, &components, &config.clone().num_threads(1), &mut pl)?
        }
    };

    let mut pool = WorkerPool::new(
        config.get_num_threads(),
        graph.num_nodes(),
        components.largest(),
    )?;
    for repeat in 0..args.repeats {
        let start = std::time::Instant::now();
        let totals = sum_paths_with_pool(&graph, &components, &config, &mut pool, &mut pl)?;
        let elapsed = start.elapsed().as_secs_f64();
        ensure!(
            totals == expected,
            "Expected {:?}, computed {:?}",
            expected,
            totals
        );
        log::info!(
            "Repeat {}: {} pairs, {} total length, {} ({:.0} visits/s)",
            repeat,
            totals.pairs,
            totals.path_lengths,
            pretty_print_elapsed(elapsed),
            graph.num_nodes() as f64 / elapsed
        );
    }

    Ok(())
}
