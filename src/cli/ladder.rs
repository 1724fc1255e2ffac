/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{GlobalArgs, NumThreadsArg, SchedulerArgs};
use crate::prelude::*;
use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ladder", about = "Sums the lengths of the shortest paths between all connected pairs of words.", long_about = None)]
pub struct CliArgs {
    /// The word lists; if none is given, /usr/share/dict/words is used.
    pub files: Vec<PathBuf>,

    #[arg(short = 'n', long, default_value_t = 0)]
    /// The number of letters of the words to select (zero means any).
    pub length: usize,

    #[arg(short = 'o', long)]
    /// Write the selected words, one per line, to this file.
    pub output: Option<PathBuf>,

    #[arg(short = 't', long)]
    /// Print a final summary line with the elapsed time.
    pub timing: bool,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,

    #[clap(flatten)]
    pub scheduler: SchedulerArgs,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let start = std::time::Instant::now();
    let length = WordLength::new(args.length)?;
    let files = if args.files.is_empty() {
        vec![PathBuf::from(DEFAULT_WORDS)]
    } else {
        args.files
    };

    let words =
        read_words(&files, length).with_context(|| format!("Cannot read words from {:?}", files))?;
    if let Some(output) = &args.output {
        write_words(&words, output)?;
    }

    let graph = find_pairs(&words)?;

    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let components = symm_components(&graph, &mut pl);
    log::info!(
        "Found {} connected components, the largest with {} words",
        components.num_components(),
        components.largest()
    );
    for (size, count) in components.size_histogram() {
        log::debug!("{:8} components with {:6} words", count, size);
    }

    let config = args.scheduler.to_config(args.num_threads.num_threads);
    let totals = sum_paths(&graph, &components, &config, &mut pl)?;
    log::info!(
        "Average shortest-path length: {:.6}",
        totals.average_length()
    );

    println!("{:12} word pairs", totals.pairs);
    println!(
        "{:12} summed lengths of one shortest path per pair",
        totals.path_lengths
    );
    if args.timing {
        println!(
            "# {:12.6} {:12} {:12} {:2} {:6} {:?}",
            start.elapsed().as_secs_f64(),
            totals.pairs,
            totals.path_lengths,
            args.length,
            words.len(),
            files
        );
    }

    Ok(())
}
