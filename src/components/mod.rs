/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Connected components of undirected graphs.
//!
//! The components are computed by [`symm_components`], which returns them
//! already sorted by decreasing size, ties broken by their smallest node.
//! The scheduler of [`sum_paths`](crate::distances::sum_paths) relies on this
//! order.
//!
//! # Examples
//! ```
//! use dsi_progress_logger::no_logging;
//! use doublets::graphs::CsrGraph;
//! use doublets::components::*;
//!
//! let graph = CsrGraph::from_edges(5, [(0, 3), (3, 4), (1, 2)])?;
//! let components = symm_components(&graph, no_logging![]);
//!
//! assert_eq!(components.num_components(), 2);
//! assert_eq!(components.members(0), &[0, 3, 4]);
//! assert_eq!(components.members(1), &[1, 2]);
//! assert_eq!(components.components(), &[0, 1, 1, 0, 0]);
//! # Ok::<(), doublets::Error>(())
//! ```

mod symm_seq;
pub use symm_seq::*;

/// Connected components.
///
/// An instance of this structure stores the members of each component, as a
/// sorted list of nodes, and the [index of the component](Components::components)
/// of each node. Components are numbered from 0 to
/// [`num_components`](Components::num_components) by decreasing size, and
/// components of the same size by increasing smallest member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    offsets: Box<[usize]>,
    members: Box<[usize]>,
    components: Box<[usize]>,
}

impl Components {
    /// Creates a new set of components from a buffer containing the sorted
    /// members of each component, given as a list of ranges of the buffer in
    /// any order.
    pub(crate) fn from_spans(members: &[usize], mut spans: Vec<(usize, usize)>) -> Self {
        spans.sort_by_key(|&(start, end)| (std::cmp::Reverse(end - start), members[start]));

        let mut offsets = Vec::with_capacity(spans.len() + 1);
        let mut sorted = Vec::with_capacity(members.len());
        let mut components = vec![0; members.len()];
        offsets.push(0);
        for (index, &(start, end)) in spans.iter().enumerate() {
            for &node in &members[start..end] {
                components[node] = index;
            }
            sorted.extend_from_slice(&members[start..end]);
            offsets.push(sorted.len());
        }
        Self {
            offsets: offsets.into(),
            members: sorted.into(),
            components: components.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_raw_parts(
        offsets: Box<[usize]>,
        members: Box<[usize]>,
        components: Box<[usize]>,
    ) -> Self {
        Self {
            offsets,
            members,
            components,
        }
    }

    /// Returns the number of connected components.
    pub fn num_components(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.components.len()
    }

    /// Returns a slice containing, for each node, the index of the component
    /// it belongs to.
    #[inline(always)]
    pub fn components(&self) -> &[usize] {
        &self.components
    }

    /// Returns the nodes of a component, sorted by increasing node.
    #[inline(always)]
    pub fn members(&self, component: usize) -> &[usize] {
        &self.members[self.offsets[component]..self.offsets[component + 1]]
    }

    /// Returns the size of a component.
    #[inline(always)]
    pub fn size(&self, component: usize) -> usize {
        self.offsets[component + 1] - self.offsets[component]
    }

    /// Returns an iterator over the member lists of the components, in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        (0..self.num_components()).map(move |c| self.members(c))
    }

    /// Returns the size of the largest component, or zero if there are
    /// no nodes.
    pub fn largest(&self) -> usize {
        if self.num_components() == 0 {
            0
        } else {
            self.size(0)
        }
    }

    /// Returns the sizes of all components, in non-increasing order.
    pub fn compute_sizes(&self) -> Box<[usize]> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Returns, for each distinct component size in decreasing order, the
    /// number of components of that size.
    pub fn size_histogram(&self) -> Vec<(usize, usize)> {
        let mut histogram: Vec<(usize, usize)> = Vec::new();
        for &size in self.compute_sizes().iter() {
            match histogram.last_mut() {
                Some((last, count)) if *last == size => *count += 1,
                _ => histogram.push((size, 1)),
            }
        }
        histogram
    }
}
