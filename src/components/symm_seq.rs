/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Components;
use crate::traits::RandomAccessGraph;
use dsi_progress_logger::ProgressLog;
use sux::prelude::*;

/// Connected components of symmetric graphs by sequential visits.
///
/// Nodes are scanned in increasing order; each node not yet assigned to a
/// component starts a new one. Isolated nodes and isolated edges are
/// recognized directly from the degrees; every other component is collected
/// by a level-by-level visit whose frontiers are reused across components.
/// No recursion is involved, so arbitrarily long paths are fine.
pub fn symm_components(graph: impl RandomAccessGraph, pl: &mut impl ProgressLog) -> Components {
    let num_nodes = graph.num_nodes();
    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Computing connected components...");

    let mut assigned = BitVec::new(num_nodes);
    let mut members = Vec::with_capacity(num_nodes);
    let mut spans = Vec::new();
    let mut curr = Vec::new();
    let mut next = Vec::new();

    for node in 0..num_nodes {
        if assigned[node] {
            continue;
        }
        let start = members.len();
        assigned.set(node, true);
        members.push(node);

        match graph.successors(node) {
            [] => {}
            &[succ] if graph.outdegree(succ) == 1 => {
                assigned.set(succ, true);
                members.push(succ);
            }
            _ => {
                curr.clear();
                curr.push(node);
                while !curr.is_empty() {
                    next.clear();
                    for &x in &curr {
                        for &succ in graph.successors(x) {
                            if !assigned[succ] {
                                assigned.set(succ, true);
                                members.push(succ);
                                next.push(succ);
                            }
                        }
                    }
                    std::mem::swap(&mut curr, &mut next);
                }
            }
        }

        members[start..].sort_unstable();
        spans.push((start, members.len()));
        pl.update_with_count(members.len() - start);
    }

    pl.done();

    Components::from_spans(&members, spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{families, CsrGraph};
    use dsi_progress_logger::no_logging;

    #[test]
    fn test_isolated_and_pairs() -> Result<(), crate::Error> {
        let graph = CsrGraph::from_edges(6, [(1, 4), (5, 2)])?;
        let components = symm_components(&graph, no_logging![]);
        assert_eq!(components.num_components(), 4);
        assert_eq!(components.members(0), &[1, 4]);
        assert_eq!(components.members(1), &[2, 5]);
        assert_eq!(components.members(2), &[0]);
        assert_eq!(components.members(3), &[3]);
        Ok(())
    }

    #[test]
    fn test_edge_to_hub_is_not_a_pair() {
        let components = symm_components(families::star(4), no_logging![]);
        assert_eq!(components.num_components(), 1);
        assert_eq!(components.members(0), &[0, 1, 2, 3]);
    }
}
