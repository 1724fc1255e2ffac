/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Sums of shortest-path lengths.
//!
//! The entry point is [`sum_paths`], which returns the number of ordered
//! pairs of distinct connected nodes of an undirected graph and the sum of
//! the lengths of their shortest paths, without ever storing the matrix of
//! distances. It runs a breadth-first visit from every node ([`bfs_sum`]) on
//! a [`WorkerPool`], choosing the parallelism granularity by component size.

mod bfs;
pub use bfs::*;

mod pool;
pub use pool::*;

mod sum_paths;
pub use sum_paths::*;
