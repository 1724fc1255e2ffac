/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// A graph providing random access to the successors of its nodes.
///
/// Nodes are dense integers in `0..num_nodes()`. The algorithms of this crate
/// work on undirected graphs, which are represented as symmetric directed
/// graphs without loops: every edge `{x, y}` appears as the two arcs `(x, y)`
/// and `(y, x)`.
///
/// The successors are returned as a slice, as the breadth-first visits
/// scanning them are the innermost loops of the crate.
pub trait RandomAccessGraph {
    /// Returns the number of nodes of the graph.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs of the graph.
    ///
    /// For a symmetric graph this is twice the number of edges.
    fn num_arcs(&self) -> u64;

    /// Returns the successors of a node, sorted by increasing node.
    fn successors(&self, node: usize) -> &[usize];

    /// Returns the number of successors of a node.
    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.successors(node).len()
    }
}

impl<G: RandomAccessGraph + ?Sized> RandomAccessGraph for &G {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        (**self).num_arcs()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> &[usize] {
        (**self).successors(node)
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        (**self).outdegree(node)
    }
}
