/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graph representations and generators.

pub mod csr_graph;
pub use csr_graph::CsrGraph;

pub mod families;

pub mod random;

pub mod prelude {
    pub use super::csr_graph::CsrGraph;
    pub use super::families;
    pub use super::random::ErdosRenyi;
}
