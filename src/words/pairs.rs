/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::WIDEST;
use crate::graphs::CsrGraph;
use crate::Error;
use std::collections::HashMap;

/// Builds the word-ladder graph of a list of distinct words.
///
/// Node `i` is the `i`-th word, and two nodes are adjacent if the words have
/// the same length and differ in exactly one position. Words are bucketed by
/// each of their masked keys (a position together with the word deprived of
/// the character at that position); two distinct words share at most one
/// masked key, and they share one exactly when they are adjacent.
///
/// # Errors
///
/// [`Error::WordTooLong`] if a word is longer than [`WIDEST`] characters;
/// a [malformed-input](crate::ErrorKind::MalformedInput) error if the list
/// contains repeated words.
pub fn find_pairs(words: &[impl AsRef<str>]) -> Result<CsrGraph, Error> {
    let mut buckets: HashMap<(usize, String), Vec<usize>> = HashMap::new();
    let mut chars = Vec::with_capacity(WIDEST);
    for (node, word) in words.iter().enumerate() {
        let word = word.as_ref();
        chars.clear();
        chars.extend(word.chars());
        if chars.len() > WIDEST {
            return Err(Error::WordTooLong {
                word: word.to_owned(),
            });
        }
        for pos in 0..chars.len() {
            let key = chars[..pos].iter().chain(&chars[pos + 1..]).collect();
            buckets.entry((pos, key)).or_default().push(node);
        }
    }
    log::debug!("{} masked keys", buckets.len());

    let mut succs = vec![Vec::new(); words.len()];
    for bucket in buckets.values().filter(|bucket| bucket.len() > 1) {
        for &x in bucket {
            succs[x].extend(bucket.iter().copied().filter(|&y| y != x));
        }
    }
    for list in succs.iter_mut() {
        list.sort_unstable();
    }

    let graph = CsrGraph::from_succ_lists(succs)?;
    log::info!(
        "Found {} edges between {} words",
        graph.num_edges(),
        words.len()
    );
    Ok(graph)
}
