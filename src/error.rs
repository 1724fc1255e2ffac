/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::path::PathBuf;

/// The broad classes of failure of this crate.
///
/// There is no transient failure: every error aborts the computation that
/// raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input does not describe a valid word list or undirected graph.
    MalformedInput,
    /// An internal consistency check of the scheduler failed.
    InvariantViolation,
    /// A total does not fit in a `u64`.
    Overflow,
    /// Reading or writing a file failed.
    Io,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Node {node} has successor {succ}, but the graph has {num_nodes} nodes")]
    SuccessorOutOfRange {
        node: usize,
        succ: usize,
        num_nodes: usize,
    },
    #[error("Node {node} has a self-loop")]
    SelfLoop { node: usize },
    #[error("The successors of node {node} are not strictly increasing: {succ} follows {last}")]
    UnsortedSuccessors { node: usize, last: usize, succ: usize },
    #[error("Arc ({node}, {succ}) has no reverse arc ({succ}, {node})")]
    Asymmetric { node: usize, succ: usize },

    #[error("Word length {0} is not in 1..={max}", max = crate::words::WIDEST)]
    WordLength(usize),
    #[error("Word {word:?} is longer than {max} characters", max = crate::words::WIDEST)]
    WordTooLong { word: String },
    #[error("No words found")]
    NoWords,

    #[error(
        "Component {component} of size {size} reached the trivial-component phase (sizes up to 2)"
    )]
    TrivialPhaseOversized { component: usize, size: usize },
    #[error("Scratch space for {capacity} nodes cannot hold a component of size {size}")]
    ScratchTooSmall { size: usize, capacity: usize },
    #[error("Scratch spaces for {capacity} nodes cannot hold component {component} of size {size}")]
    PoolTooSmall {
        component: usize,
        size: usize,
        capacity: usize,
    },
    #[error("A worker stopped after {received} of {expected} results were delivered")]
    WorkerLost { received: usize, expected: usize },
    #[error("Cannot build a thread pool with {num_threads} threads")]
    ThreadPool {
        num_threads: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },

    #[error("Overflow while summing {what}")]
    Overflow { what: &'static str },

    #[error("Cannot access {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SuccessorOutOfRange { .. }
            | Error::SelfLoop { .. }
            | Error::UnsortedSuccessors { .. }
            | Error::Asymmetric { .. }
            | Error::WordLength(_)
            | Error::WordTooLong { .. }
            | Error::NoWords => ErrorKind::MalformedInput,
            Error::TrivialPhaseOversized { .. }
            | Error::ScratchTooSmall { .. }
            | Error::PoolTooSmall { .. }
            | Error::WorkerLost { .. }
            | Error::ThreadPool { .. } => ErrorKind::InvariantViolation,
            Error::Overflow { .. } => ErrorKind::Overflow,
            Error::Io { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            Error::SelfLoop { node: 3 }.kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            Error::TrivialPhaseOversized {
                component: 7,
                size: 3
            }
            .kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            Error::Overflow { what: "path lengths" }.kind(),
            ErrorKind::Overflow
        );
    }

    #[test]
    fn test_messages_name_component() {
        let err = Error::TrivialPhaseOversized {
            component: 12,
            size: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("5"));
    }
}
