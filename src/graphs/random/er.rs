/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::CsrGraph;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Provides undirected Erdös-Rényi random graphs.
///
/// The Erdös-Rényi random graph model is a simple model for generating random
/// graphs. It is parameterized by the number of nodes `n` and the probability
/// `p` of an edge between any two distinct nodes. Loops are never included.
///
/// The same parameters and seed always yield the same graph. Generation time
/// is quadratic in `n`.
#[derive(Debug, Clone)]
pub struct ErdosRenyi {
    n: usize,
    p: f64,
    seed: u64,
}

impl ErdosRenyi {
    /// Creates a new Erdös-Rényi random graph, given the number of
    /// nodes, the probability of an edge between any two nodes, and a
    /// seed for the [pseudorandom number generator](SmallRng).
    pub fn new(n: usize, p: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&p), "p must be in [0..1]");
        Self { n, p, seed }
    }

    /// Returns the number of nodes of the graph.
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Draws the graph.
    pub fn generate(&self) -> CsrGraph {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut edges = Vec::new();
        for x in 0..self.n {
            for y in x + 1..self.n {
                if rng.random_bool(self.p) {
                    edges.push((x, y));
                }
            }
        }
        CsrGraph::from_valid_edges(self.n, edges)
    }
}
