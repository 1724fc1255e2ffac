/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Classical families of undirected graphs.
//!
//! Each builder returns a [`CsrGraph`]; the [`expected`] module contains the
//! closed forms of the number of ordered connected pairs and of the sum of
//! their shortest-path lengths for each family, which makes these graphs the
//! natural fixtures for testing and benchmarking
//! [`sum_paths`](crate::distances::sum_paths).

use super::CsrGraph;
use crate::traits::RandomAccessGraph;

/// Returns the path `0 – 1 – ⋯ – (n − 1)`.
pub fn path(n: usize) -> CsrGraph {
    CsrGraph::from_valid_edges(n, (1..n).map(|x| (x - 1, x)))
}

/// Returns the cycle on `n` nodes.
///
/// # Panics
///
/// If `n` is smaller than three.
pub fn cycle(n: usize) -> CsrGraph {
    assert!(n >= 3, "A cycle needs at least three nodes, got {}", n);
    CsrGraph::from_valid_edges(n, (0..n).map(|x| (x, (x + 1) % n)))
}

/// Returns the complete graph on `n` nodes.
pub fn complete(n: usize) -> CsrGraph {
    CsrGraph::from_valid_edges(n, (0..n).flat_map(|x| (x + 1..n).map(move |y| (x, y))))
}

/// Returns the star on `n` nodes; the hub is the last node.
pub fn star(n: usize) -> CsrGraph {
    let hub = n.saturating_sub(1);
    CsrGraph::from_valid_edges(n, (0..hub).map(|x| (x, hub)))
}

/// Returns the wheel on `n` nodes: a cycle on the first `n − 1` nodes,
/// all connected to the last node, the hub.
///
/// # Panics
///
/// If `n` is smaller than four.
pub fn wheel(n: usize) -> CsrGraph {
    assert!(n >= 4, "A wheel needs at least four nodes, got {}", n);
    let hub = n - 1;
    CsrGraph::from_valid_edges(
        n,
        (0..hub)
            .map(|x| (x, (x + 1) % hub))
            .chain((0..hub).map(|x| (x, hub))),
    )
}

/// Returns the `rows` × `cols` lattice, in which the node `r · cols + c` is
/// connected to the nodes above, on the left, on the right, and below it.
pub fn lattice(rows: usize, cols: usize) -> CsrGraph {
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let node = r * cols + c;
            if c + 1 < cols {
                edges.push((node, node + 1));
            }
            if r + 1 < rows {
                edges.push((node, node + cols));
            }
        }
    }
    CsrGraph::from_valid_edges(rows * cols, edges)
}

/// Returns the complete bipartite graph `K(m, n)`, whose sides are the first
/// `m` nodes and the last `n` nodes.
pub fn complete_bipartite(m: usize, n: usize) -> CsrGraph {
    CsrGraph::from_valid_edges(m + n, (0..m).flat_map(|x| (m..m + n).map(move |y| (x, y))))
}

/// Returns the disjoint union of the given graphs, in which the nodes of each
/// graph are renumbered after those of the previous ones.
pub fn disjoint_union<'a>(graphs: impl IntoIterator<Item = &'a CsrGraph>) -> CsrGraph {
    let mut offset = 0;
    let mut edges = Vec::new();
    for graph in graphs {
        edges.extend(graph.edges().map(|(x, y)| (x + offset, y + offset)));
        offset += graph.num_nodes();
    }
    CsrGraph::from_valid_edges(offset, edges)
}

/// Closed forms for the totals of each family.
///
/// All functions return the number of ordered pairs of distinct connected
/// nodes and the sum of their shortest-path lengths, with the same arguments
/// as the builder of the same name.
pub mod expected {
    use crate::distances::Totals;

    /// Ordered pairs of distinct nodes in a connected graph with `n` nodes.
    fn pairs(n: u64) -> u64 {
        n * n.saturating_sub(1)
    }

    /// Sum of `|i − j|` over the ordered pairs of `0..n`.
    fn linear(n: u64) -> u64 {
        n.saturating_sub(1) * n * (n + 1) / 3
    }

    pub fn path(n: usize) -> Totals {
        let n = n as u64;
        Totals::new(pairs(n), linear(n))
    }

    pub fn cycle(n: usize) -> Totals {
        let n = n as u64;
        let path_lengths = if n % 2 == 0 {
            n * n * n / 4
        } else {
            (n - 1) * n * (n + 1) / 4
        };
        Totals::new(pairs(n), path_lengths)
    }

    pub fn complete(n: usize) -> Totals {
        let n = n as u64;
        Totals::new(pairs(n), pairs(n))
    }

    pub fn star(n: usize) -> Totals {
        let n = n as u64;
        let leaves = n.saturating_sub(1);
        Totals::new(pairs(n), 2 * leaves * leaves)
    }

    pub fn wheel(n: usize) -> Totals {
        let n = n as u64;
        Totals::new(pairs(n), 2 * (n - 1) * (n - 2))
    }

    pub fn lattice(rows: usize, cols: usize) -> Totals {
        let (r, c) = (rows as u64, cols as u64);
        Totals::new(pairs(r * c), r * r * linear(c) + c * c * linear(r))
    }

    /// Note that if one of the sides is empty the graph is not connected.
    pub fn complete_bipartite(m: usize, n: usize) -> Totals {
        let (m, n) = (m as u64, n as u64);
        if m == 0 || n == 0 {
            return Totals::default();
        }
        Totals::new(pairs(m + n), 2 * (pairs(m) + m * n + pairs(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees() {
        let g = star(5);
        assert_eq!(g.outdegree(4), 4);
        assert_eq!(g.num_edges(), 4);

        let g = wheel(6);
        assert_eq!(g.outdegree(5), 5);
        assert_eq!(g.num_edges(), 10);

        let g = lattice(3, 4);
        assert_eq!(g.num_edges(), 3 * 3 + 2 * 4);
        assert_eq!(g.successors(5), &[1, 4, 6, 9]);

        let g = complete_bipartite(2, 3);
        assert_eq!(g.successors(0), &[2, 3, 4]);
        assert_eq!(g.successors(4), &[0, 1]);
    }

    #[test]
    fn test_disjoint_union() {
        let g = disjoint_union([&cycle(3), &path(1), &path(2)]);
        assert_eq!(g.num_nodes(), 6);
        assert_eq!(g.successors(2), &[0, 1]);
        assert_eq!(g.outdegree(3), 0);
        assert_eq!(g.successors(4), &[5]);
    }

    #[test]
    fn test_expected_small_cases() {
        assert_eq!(expected::path(4), crate::distances::Totals::new(12, 20));
        assert_eq!(expected::cycle(6).path_lengths, 54);
        assert_eq!(expected::lattice(3, 3).path_lengths, 144);
        assert_eq!(expected::star(5).path_lengths, 32);
        assert_eq!(expected::wheel(4), expected::complete(4));
        assert_eq!(expected::complete_bipartite(1, 1), expected::path(2));
    }
}
