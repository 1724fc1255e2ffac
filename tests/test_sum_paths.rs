/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use doublets::graphs::families::{self, expected};
use doublets::prelude::*;
use dsi_progress_logger::prelude::*;

fn totals(graph: &CsrGraph, config: &SumPathsConfig) -> Result<Totals> {
    let components = symm_components(graph, no_logging![]);
    Ok(sum_paths(graph, &components, config, no_logging![])?)
}

/// Same as [`totals`], but reusing a pool.
fn pooled_totals(
    graph: &CsrGraph,
    config: &SumPathsConfig,
    pool: &mut WorkerPool,
) -> Result<Totals> {
    let components = symm_components(graph, no_logging![]);
    Ok(sum_paths_with_pool(
        graph,
        &components,
        config,
        pool,
        no_logging![],
    )?)
}

fn sequential() -> SumPathsConfig {
    SumPathsConfig::default().num_threads(1)
}

#[test]
fn test_path() -> Result<()> {
    assert_eq!(totals(&families::path(4), &sequential())?, Totals::new(12, 20));
    Ok(())
}

#[test]
fn test_complete() -> Result<()> {
    assert_eq!(
        totals(&families::complete(5), &sequential())?,
        Totals::new(20, 20)
    );
    Ok(())
}

#[test]
fn test_cycle() -> Result<()> {
    assert_eq!(totals(&families::cycle(6), &sequential())?, Totals::new(30, 54));
    assert_eq!(totals(&families::cycle(7), &sequential())?, expected::cycle(7));
    Ok(())
}

#[test]
fn test_lattice() -> Result<()> {
    assert_eq!(
        totals(&families::lattice(3, 3), &sequential())?,
        Totals::new(72, 144)
    );
    assert_eq!(
        totals(&families::lattice(4, 7), &sequential())?,
        expected::lattice(4, 7)
    );
    Ok(())
}

#[test]
fn test_star() -> Result<()> {
    assert_eq!(totals(&families::star(5), &sequential())?, Totals::new(20, 32));
    Ok(())
}

#[test]
fn test_triangle_and_isolated_node() -> Result<()> {
    let graph = CsrGraph::from_edges(4, [(0, 1), (1, 2), (2, 0)])?;
    assert_eq!(totals(&graph, &sequential())?, Totals::new(6, 6));
    Ok(())
}

#[test]
fn test_wheel() -> Result<()> {
    for n in 4..12 {
        let totals = totals(&families::wheel(n), &sequential())?;
        assert_eq!(totals.pairs, (n * (n - 1)) as u64);
        assert_eq!(totals.path_lengths, (2 * (n - 1) * (n - 2)) as u64);
    }
    Ok(())
}

#[test]
fn test_complete_bipartite() -> Result<()> {
    for (m, n) in [(1, 1), (1, 5), (3, 4), (6, 6)] {
        let totals = totals(&families::complete_bipartite(m, n), &sequential())?;
        assert_eq!(totals.pairs, ((m + n) * (m + n - 1)) as u64);
        assert_eq!(
            totals.path_lengths,
            (2 * (m * (m - 1) + m * n + n * (n - 1))) as u64
        );
    }
    Ok(())
}

#[test]
fn test_no_edges() -> Result<()> {
    let config = SumPathsConfig::default().num_threads(4).sequential_floor(0);
    let graph = CsrGraph::from_edges(10, Vec::new())?;
    assert_eq!(totals(&graph, &config)?, Totals::default());
    assert_eq!(totals(&graph, &sequential())?, Totals::default());
    assert_eq!(totals(&CsrGraph::new(), &config)?, Totals::default());
    Ok(())
}

#[test]
fn test_single_pair() -> Result<()> {
    let config = SumPathsConfig::default().num_threads(4).sequential_floor(0);
    assert_eq!(totals(&families::path(2), &config)?, Totals::new(2, 2));
    assert_eq!(totals(&families::path(2), &sequential())?, Totals::new(2, 2));
    Ok(())
}

#[test]
fn test_pairs_per_component() -> Result<()> {
    let graph = ErdosRenyi::new(400, 0.004, 7).generate();
    let components = symm_components(&graph, no_logging![]);
    let config = SumPathsConfig::default().num_threads(3).sequential_floor(0);
    let mut expected_pairs = 0;
    for members in components.iter() {
        let s = members.len();
        // The subgraph induced by the component, renumbered
        let induced = CsrGraph::from_edges(
            s,
            graph.edges().filter_map(|(x, y)| {
                let x = members.binary_search(&x).ok()?;
                let y = members.binary_search(&y).ok()?;
                Some((x, y))
            }),
        )?;
        assert_eq!(totals(&induced, &config)?.pairs, (s * (s - 1)) as u64);
        expected_pairs += (s * (s - 1)) as u64;
    }
    let mut pool = WorkerPool::new(3, graph.num_nodes(), components.largest())?;
    let totals = sum_paths_with_pool(&graph, &components, &config, &mut pool, no_logging![])?;
    assert_eq!(totals.pairs, expected_pairs);
    Ok(())
}

#[test]
fn test_idempotence() -> Result<()> {
    let graph = ErdosRenyi::new(500, 0.004, 1).generate();
    let components = symm_components(&graph, no_logging![]);
    let config = SumPathsConfig::default()
        .num_threads(4)
        .sequential_floor(0)
        .breakpoint(8);
    let mut pool = WorkerPool::new(4, graph.num_nodes(), components.largest())?;
    let first = sum_paths_with_pool(&graph, &components, &config, &mut pool, no_logging![])?;
    let second = sum_paths_with_pool(&graph, &components, &config, &mut pool, no_logging![])?;
    assert_eq!(first, second);
    assert_eq!(first, sum_paths(&graph, &components, &config, no_logging![])?);
    Ok(())
}

#[test]
fn test_undersized_pool() -> Result<()> {
    let graph = families::path(200);
    let components = symm_components(&graph, no_logging![]);
    let config = SumPathsConfig::default().num_threads(2).sequential_floor(0);
    let mut pool = WorkerPool::new(2, graph.num_nodes(), 10)?;
    let err = sum_paths_with_pool(&graph, &components, &config, &mut pool, no_logging![])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    assert!(matches!(
        err,
        Error::PoolTooSmall {
            component: 0,
            size: 200,
            capacity: 10
        }
    ));
    Ok(())
}

/// A graph containing components of many sizes, with its totals.
fn mixed() -> (CsrGraph, Totals) {
    let graph = families::disjoint_union([
        &families::lattice(6, 6),
        &families::path(40),
        &families::star(33),
        &families::wheel(12),
        &families::cycle(7),
        &families::complete_bipartite(3, 4),
        &families::complete(5),
        &families::cycle(3),
        &families::path(2),
        &families::path(2),
        &families::path(1),
        &families::path(1),
    ]);
    let totals = [
        expected::lattice(6, 6),
        expected::path(40),
        expected::star(33),
        expected::wheel(12),
        expected::cycle(7),
        expected::complete_bipartite(3, 4),
        expected::complete(5),
        expected::cycle(3),
        expected::path(2),
        expected::path(2),
    ]
    .into_iter()
    .fold(Totals::default(), |acc, t| {
        Totals::new(acc.pairs + t.pairs, acc.path_lengths + t.path_lengths)
    });
    (graph, totals)
}

macro_rules! test_config {
    ($name:ident, $config:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn test_mixed_components() -> Result<()> {
                let (graph, expected) = mixed();
                assert_eq!(totals(&graph, &$config)?, expected);
                Ok(())
            }

            #[test]
            fn test_families() -> Result<()> {
                let config = $config;
                let mut pool = WorkerPool::new(config.get_num_threads(), 200, 200)?;
                for n in 1..=200 {
                    let mut check = |graph: CsrGraph, expected: Totals, name: &str| -> Result<()> {
                        assert_eq!(totals(&graph, &config)?, expected, "{}({})", name, n);
                        assert_eq!(
                            pooled_totals(&graph, &config, &mut pool)?,
                            expected,
                            "{}({}) with a shared pool",
                            name,
                            n
                        );
                        Ok(())
                    };
                    check(families::path(n), expected::path(n), "path")?;
                    check(families::star(n), expected::star(n), "star")?;
                    if n >= 3 {
                        check(families::cycle(n), expected::cycle(n), "cycle")?;
                    }
                    if n >= 4 {
                        check(families::wheel(n), expected::wheel(n), "wheel")?;
                    }
                    if n <= 64 {
                        check(families::complete(n), expected::complete(n), "complete")?;
                    }
                }
                for rows in 1..=12 {
                    for cols in 1..=12 {
                        let graph = families::lattice(rows, cols);
                        assert_eq!(
                            pooled_totals(&graph, &config, &mut pool)?,
                            expected::lattice(rows, cols),
                            "lattice({}, {})",
                            rows,
                            cols
                        );
                    }
                }
                for m in 0..=10 {
                    for n in 0..=10 {
                        let graph = families::complete_bipartite(m, n);
                        assert_eq!(
                            pooled_totals(&graph, &config, &mut pool)?,
                            expected::complete_bipartite(m, n),
                            "complete_bipartite({}, {})",
                            m,
                            n
                        );
                    }
                }
                Ok(())
            }

            #[test]
            fn test_random_graphs() -> Result<()> {
                for seed in 0..4 {
                    for (n, p) in [(200, 0.005), (300, 0.01), (150, 0.03), (250, 0.0)] {
                        let graph = ErdosRenyi::new(n, p, seed).generate();
                        assert_eq!(totals(&graph, &$config)?, totals(&graph, &sequential())?);
                    }
                }
                Ok(())
            }
        }
    };
}

test_config!(single_thread, SumPathsConfig::default().num_threads(1));
test_config!(
    default_breakpoint,
    SumPathsConfig::default().num_threads(4).sequential_floor(0)
);
test_config!(
    smallest_breakpoint,
    SumPathsConfig::default()
        .num_threads(3)
        .sequential_floor(0)
        .breakpoint(0)
);
test_config!(
    huge_breakpoint,
    SumPathsConfig::default()
        .num_threads(2)
        .sequential_floor(0)
        .breakpoint(usize::MAX)
);
test_config!(
    more_threads_than_nodes,
    SumPathsConfig::default()
        .num_threads(64)
        .sequential_floor(0)
        .breakpoint(4)
);
test_config!(
    high_floor,
    SumPathsConfig::default()
        .num_threads(4)
        .sequential_floor(1_000_000)
);

#[cfg(feature = "slow_tests")]
#[test]
fn test_large_lattice() -> Result<()> {
    let graph = families::lattice(150, 150);
    let config = SumPathsConfig::default();
    assert_eq!(totals(&graph, &config)?, expected::lattice(150, 150));
    Ok(())
}
