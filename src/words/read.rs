/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::WIDEST;
use crate::Error;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// The word list used when no file is given.
pub const DEFAULT_WORDS: &str = "/usr/share/dict/words";

/// Characters stripped from both ends of each word.
const TRIM: &str = " \t0123456789.,?;:'\"[]{}=+~!@#$%^&*()\\|-";

/// The length of the words to select.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WordLength {
    /// Words of any length between one and [`WIDEST`].
    #[default]
    Any,
    /// Words of exactly the given length.
    Exactly(usize),
}

impl WordLength {
    /// Interprets a length, where zero means any length.
    pub fn new(length: usize) -> Result<Self, Error> {
        match length {
            0 => Ok(Self::Any),
            1..=WIDEST => Ok(Self::Exactly(length)),
            _ => Err(Error::WordLength(length)),
        }
    }

    /// Returns the range of selected lengths.
    pub fn range(&self) -> RangeInclusive<usize> {
        match *self {
            Self::Any => 1..=WIDEST,
            Self::Exactly(length) => length..=length,
        }
    }
}

impl core::fmt::Display for WordLength {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Any => write!(f, "1..{}", WIDEST),
            Self::Exactly(length) => write!(f, "{}", length),
        }
    }
}

/// Counters of a word-reading pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    /// Whitespace-separated tokens read.
    pub read: usize,
    /// Tokens of the selected length, including repeated ones.
    pub added: usize,
    /// Tokens longer than [`WIDEST`] characters.
    pub too_long: usize,
}

impl core::ops::AddAssign for ReadStats {
    fn add_assign(&mut self, other: Self) {
        self.read += other.read;
        self.added += other.added;
        self.too_long += other.too_long;
    }
}

/// Normalizes a token: strips digits and punctuation from both ends, and
/// turns it to lowercase.
fn normalize(token: &str) -> String {
    token.trim_matches(|c| TRIM.contains(c)).to_lowercase()
}

/// Adds the words of the selected length found in `reader` to `unique`.
fn collect(
    reader: impl BufRead,
    length: WordLength,
    unique: &mut HashSet<String>,
) -> std::io::Result<ReadStats> {
    let range = length.range();
    let mut stats = ReadStats::default();
    for line in reader.split(b'\n') {
        let line = line?;
        for token in String::from_utf8_lossy(&line).split_whitespace() {
            stats.read += 1;
            let word = normalize(token);
            let len = word.chars().count();
            if range.contains(&len) {
                stats.added += 1;
                unique.insert(word);
            } else if len > WIDEST {
                stats.too_long += 1;
            }
        }
    }
    Ok(stats)
}

fn into_sorted(unique: HashSet<String>) -> Result<Vec<String>, Error> {
    if unique.is_empty() {
        return Err(Error::NoWords);
    }
    let mut words = unique.into_iter().collect::<Vec<_>>();
    words.sort_unstable();
    Ok(words)
}

/// Reads the distinct words of the selected length from a reader, and
/// returns them sorted.
///
/// Tokens are separated by whitespace; each token is stripped of digits and
/// punctuation at both ends and turned to lowercase. Length is measured in
/// characters. The counters of `stats` are incremented.
///
/// # Errors
///
/// [`Error::NoWords`] if no word is selected, [`Error::Io`] if reading
/// fails.
pub fn read_words_from(
    reader: impl BufRead,
    length: WordLength,
    stats: &mut ReadStats,
) -> Result<Vec<String>, Error> {
    let mut unique = HashSet::new();
    *stats += collect(reader, length, &mut unique).map_err(|source| Error::Io {
        path: PathBuf::from("-"),
        source,
    })?;
    into_sorted(unique)
}

/// Reads the distinct words of the selected length from the given files,
/// and returns them sorted.
///
/// Tokens are processed as in [`read_words_from`]. Files that cannot be read
/// are skipped with a warning, as are the words longer than [`WIDEST`]
/// characters.
///
/// # Errors
///
/// [`Error::NoWords`] if no word is selected.
pub fn read_words<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
    length: WordLength,
) -> Result<Vec<String>, Error> {
    let mut unique = HashSet::new();
    let mut total = ReadStats::default();
    let mut num_files = 0;

    for path in paths {
        let path = path.as_ref();
        num_files += 1;
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("Cannot open {}: {}", path.display(), err);
                continue;
            }
        };
        let stats = match collect(BufReader::new(file), length, &mut unique) {
            Ok(stats) => stats,
            Err(err) => {
                log::warn!("Cannot read {}: {}", path.display(), err);
                continue;
            }
        };
        if stats.too_long > 0 {
            log::warn!(
                "Skipped {} words longer than {} characters in {}",
                stats.too_long,
                WIDEST,
                path.display()
            );
        }
        log::debug!(
            "Added {} of {} words from {}",
            stats.added,
            stats.read,
            path.display()
        );
        total += stats;
    }

    if total.too_long > 0 {
        log::warn!(
            "Skipped a total of {} words longer than {} characters",
            total.too_long,
            WIDEST
        );
    }
    log::info!(
        "Read {} unique words of length {} from {} files ({} repeated)",
        unique.len(),
        length,
        num_files,
        total.added - unique.len()
    );
    into_sorted(unique)
}

/// Writes words to a file, one per line.
pub fn write_words(words: &[impl AsRef<str>], path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.to_owned(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    for word in words {
        writeln!(writer, "{}", word.as_ref()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    log::info!("Wrote {} words to {}", words.len(), path.display());
    Ok(())
}
