/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Traits
//! This modules contains the traits that are used throughout the crate.
//! They are collected into a module so you can do `use doublets::traits::*;`
//! for ease of use.

mod graph;
pub use graph::*;
