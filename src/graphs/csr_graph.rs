/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::RandomAccessGraph;
use crate::Error;

/// A compressed sparse-row undirected graph.
///
/// It is a graph representation that stores the degree-cumulative function
/// (DCF) and the successors in two boxed slices. The DCF is a sequence of
/// offsets that indicates the start of the neighbors of each node in the
/// graph.
///
/// A [`CsrGraph`] can only be built through its checked constructors, which
/// guarantee that the graph is symmetric, has no loops, and that the
/// successors of each node are strictly increasing. The graph is immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    dcf: Box<[usize]>,
    successors: Box<[usize]>,
}

impl core::default::Default for CsrGraph {
    fn default() -> Self {
        Self {
            dcf: vec![0].into(),
            successors: vec![].into(),
        }
    }
}

impl CsrGraph {
    /// Creates an empty CSR graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new CSR graph from the lists of successors of each node.
    ///
    /// The number of nodes is the number of lists. Each list must be strictly
    /// increasing, must not contain the node itself, and every arc must have
    /// its reverse arc.
    pub fn from_succ_lists<L, I>(lists: L) -> Result<Self, Error>
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = usize>,
    {
        let lists = lists.into_iter();
        let mut dcf = Vec::with_capacity(lists.size_hint().0 + 1);
        dcf.push(0);
        let mut successors = Vec::new();
        for succs in lists {
            successors.extend(succs);
            dcf.push(successors.len());
        }
        Self::from_parts(dcf.into(), successors.into())
    }

    /// Creates a new CSR graph with `num_nodes` nodes from a list of
    /// undirected edges.
    ///
    /// Each edge is added in both directions; repeated edges are merged.
    /// Loops and edges with an endpoint out of range are rejected.
    pub fn from_edges(
        num_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, Error> {
        let mut arcs = Vec::new();
        for (x, y) in edges {
            if x == y {
                return Err(Error::SelfLoop { node: x });
            }
            if x >= num_nodes || y >= num_nodes {
                let (node, succ) = if x >= num_nodes { (y, x) } else { (x, y) };
                return Err(Error::SuccessorOutOfRange {
                    node,
                    succ,
                    num_nodes,
                });
            }
            arcs.push((x, y));
        }
        Ok(Self::from_valid_edges(num_nodes, arcs))
    }

    /// Builds a graph from edges that are known to be loopless and in range.
    pub(crate) fn from_valid_edges(
        num_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut arcs = Vec::new();
        for (x, y) in edges {
            arcs.push((x, y));
            arcs.push((y, x));
        }
        arcs.sort_unstable();
        arcs.dedup();

        let mut dcf = vec![0; num_nodes + 1];
        for &(x, _) in &arcs {
            dcf[x + 1] += 1;
        }
        for x in 0..num_nodes {
            dcf[x + 1] += dcf[x];
        }
        let successors = arcs.into_iter().map(|(_, y)| y).collect::<Vec<_>>();
        let graph = Self {
            dcf: dcf.into(),
            successors: successors.into(),
        };
        debug_assert!(graph.check().is_ok());
        graph
    }

    /// Creates a new CSR graph from a degree-cumulative function and
    /// successors, checking that they describe a symmetric loopless graph
    /// with strictly increasing successor lists.
    ///
    /// # Panics
    ///
    /// If the degree-cumulative function is empty, does not start at zero,
    /// is not monotone, or does not end at the number of successors.
    pub fn from_parts(dcf: Box<[usize]>, successors: Box<[usize]>) -> Result<Self, Error> {
        assert!(!dcf.is_empty(), "The degree-cumulative function is empty");
        assert_eq!(dcf[0], 0, "The degree-cumulative function must start at 0");
        assert!(
            dcf.windows(2).all(|w| w[0] <= w[1]),
            "The degree-cumulative function is not monotone"
        );
        assert_eq!(
            dcf[dcf.len() - 1],
            successors.len(),
            "The degree-cumulative function does not match the number of successors"
        );
        let graph = Self { dcf, successors };
        graph.check()?;
        Ok(graph)
    }

    fn check(&self) -> Result<(), Error> {
        let num_nodes = self.num_nodes();
        for node in 0..num_nodes {
            let mut last = None;
            for &succ in self.successors(node) {
                if succ >= num_nodes {
                    return Err(Error::SuccessorOutOfRange {
                        node,
                        succ,
                        num_nodes,
                    });
                }
                if succ == node {
                    return Err(Error::SelfLoop { node });
                }
                if let Some(last) = last {
                    if succ <= last {
                        return Err(Error::UnsortedSuccessors { node, last, succ });
                    }
                }
                last = Some(succ);
            }
        }
        // Successor lists are now known to be sorted
        for node in 0..num_nodes {
            for &succ in self.successors(node) {
                if self.successors(succ).binary_search(&node).is_err() {
                    return Err(Error::Asymmetric { node, succ });
                }
            }
        }
        Ok(())
    }

    /// Returns the degree-cumulative function.
    pub fn dcf(&self) -> &[usize] {
        &self.dcf
    }

    /// Returns the number of (undirected) edges.
    pub fn num_edges(&self) -> usize {
        self.successors.len() / 2
    }

    /// Returns the list of edges `{x, y}` with `x < y`, in lexicographical
    /// order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_nodes()).flat_map(move |x| {
            self.successors(x)
                .iter()
                .copied()
                .filter(move |&y| x < y)
                .map(move |y| (x, y))
        })
    }
}

impl RandomAccessGraph for CsrGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.dcf.len() - 1
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.successors.len() as u64
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> &[usize] {
        &self.successors[self.dcf[node]..self.dcf[node + 1]]
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.dcf[node + 1] - self.dcf[node]
    }
}
