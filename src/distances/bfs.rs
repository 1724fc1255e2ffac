/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::RandomAccessGraph;
use crate::Error;

/// Reusable state for breadth-first visits.
///
/// A scratch space contains a distance array and a visit-stamp array indexed
/// by node, and a queue able to hold a whole component. It is allocated once
/// and reused by all visits of a worker: instead of clearing the arrays
/// before each visit, every visit uses a new generation, and a node is
/// visited exactly when its stamp is the current generation. The stamps are
/// cleared only when the generation counter wraps around.
///
/// Distances are meaningful only for nodes visited by the last visit, which
/// is why they are accessible only through [`distance`](Scratch::distance).
/// They are stored on 32 bits, so components cannot have more than 2³²
/// nodes.
#[derive(Debug, Clone)]
pub struct Scratch {
    dist: Box<[u32]>,
    stamp: Box<[u32]>,
    queue: Box<[usize]>,
    generation: u32,
}

impl Scratch {
    /// Creates a scratch space for visits of components with at most
    /// `capacity` nodes in a graph with `num_nodes` nodes.
    pub fn new(num_nodes: usize, capacity: usize) -> Self {
        Self {
            dist: vec![0; num_nodes].into(),
            stamp: vec![0; num_nodes].into(),
            queue: vec![0; capacity].into(),
            generation: 0,
        }
    }

    /// Returns the maximum size of a component this scratch space can visit.
    pub fn capacity(&self) -> usize {
        self.queue.len()
    }

    /// Returns the distance of a node from the source of the last visit, or
    /// `None` if the node was not reached by it.
    pub fn distance(&self, node: usize) -> Option<usize> {
        if self.generation != 0 && self.stamp[node] == self.generation {
            Some(self.dist[node] as usize)
        } else {
            None
        }
    }

    /// Starts a new generation, so that all nodes become unvisited.
    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamp.fill(0);
            self.generation = 1;
        }
        self.generation
    }
}

/// Returns the sum of the distances from `source` to all other nodes of its
/// component.
///
/// The visit is level-synchronous and uses the queue of the scratch space
/// with a head and a tail index, so it performs no allocation. After the
/// call, [`Scratch::distance`] returns the distance from `source` of every
/// member of the component.
///
/// The graph is assumed to be unweighted: every arc has length one.
///
/// # Errors
///
/// [`Error::ScratchTooSmall`] if the scratch space cannot hold the
/// component.
///
/// # Panics
///
/// In debug mode, if `source` is not in `component` or if the visit does not
/// reach exactly the members of `component`.
pub fn bfs_sum(
    graph: &impl RandomAccessGraph,
    component: &[usize],
    source: usize,
    scratch: &mut Scratch,
) -> Result<u64, Error> {
    if component.len() > scratch.queue.len() {
        return Err(Error::ScratchTooSmall {
            size: component.len(),
            capacity: scratch.queue.len(),
        });
    }
    if graph.num_nodes() > scratch.stamp.len() {
        return Err(Error::ScratchTooSmall {
            size: graph.num_nodes(),
            capacity: scratch.stamp.len(),
        });
    }
    debug_assert!(
        component.binary_search(&source).is_ok(),
        "Node {} is not in the component",
        source
    );

    let generation = scratch.next_generation();
    let Scratch {
        dist, stamp, queue, ..
    } = scratch;

    stamp[source] = generation;
    dist[source] = 0;
    queue[0] = source;
    let (mut head, mut tail) = (0, 1);
    let mut sum = 0_u64;
    let mut level = 0_u32;

    while head < tail {
        let level_end = tail;
        level += 1;
        while head < level_end {
            let node = queue[head];
            head += 1;
            for &succ in graph.successors(node) {
                if stamp[succ] != generation {
                    stamp[succ] = generation;
                    dist[succ] = level;
                    sum += u64::from(level);
                    queue[tail] = succ;
                    tail += 1;
                }
            }
        }
    }

    debug_assert_eq!(tail, component.len(), "The visit left the component");
    Ok(sum)
}

/// Returns the sum of the distances between all ordered pairs of nodes of a
/// component, running [`bfs_sum`] from each of its members.
pub fn component_sum(
    graph: &impl RandomAccessGraph,
    component: &[usize],
    scratch: &mut Scratch,
) -> Result<u64, Error> {
    let mut sum = 0_u64;
    for &source in component {
        sum = sum
            .checked_add(bfs_sum(graph, component, source, scratch)?)
            .ok_or(Error::Overflow {
                what: "path lengths",
            })?;
    }
    Ok(sum)
}
