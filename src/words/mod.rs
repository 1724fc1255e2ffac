/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Word lists and their word-ladder graphs.
//!
//! Words are read from text files by [`read_words`], and turned into an
//! undirected graph by [`find_pairs`]: two words are adjacent if they have
//! the same length and differ in exactly one letter.
//!
//! # Examples
//! ```
//! use doublets::words::*;
//! use doublets::traits::RandomAccessGraph;
//!
//! let mut stats = ReadStats::default();
//! let words = read_words_from("cold cord, card; WARD warm cold".as_bytes(), WordLength::Any, &mut stats)?;
//! assert_eq!(words, ["card", "cold", "cord", "ward", "warm"]);
//!
//! let graph = find_pairs(&words)?;
//! assert_eq!(graph.successors(0), &[2, 3]);
//! # Ok::<(), doublets::Error>(())
//! ```

mod pairs;
pub use pairs::*;

mod read;
pub use read::*;

/// The maximum length of a word, in characters.
pub const WIDEST: usize = 20;
