/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command-line interface structs, functions, and methods.
//!
//! Each command is implemented as a submodule.

use crate::build_info;
use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::time::{Duration, SystemTime};

pub mod bench;
pub mod ladder;

/// Parses a positive number of threads, for use as a `value_parser`.
pub fn num_threads_parser(arg: &str) -> Result<usize> {
    let num_threads = arg
        .parse::<usize>()
        .with_context(|| format!("Invalid number of threads {:?}", arg))?;
    ensure!(num_threads > 0, "At least one thread is needed");
    Ok(num_threads)
}

/// Shared CLI arguments for commands that specify a number of threads.
#[derive(Args, Debug)]
pub struct NumThreadsArg {
    #[arg(short = 'j', long, default_value_t = rayon::current_num_threads().max(1), value_parser = num_threads_parser)]
    /// The number of threads to use.
    pub num_threads: usize,
}

/// Shared CLI arguments for commands that tune the scheduler.
#[derive(Args, Debug)]
pub struct SchedulerArgs {
    #[arg(long, default_value_t = crate::distances::SumPathsConfig::DEFAULT_BREAKPOINT)]
    /// Components with at least this many nodes have their visits spread
    /// over all threads; smaller ones are assigned to a single thread.
    pub breakpoint: usize,

    #[arg(long, default_value_t = crate::distances::SumPathsConfig::DEFAULT_SEQUENTIAL_FLOOR)]
    /// If no component has at least this many nodes, a single thread is used.
    pub sequential_floor: usize,
}

impl SchedulerArgs {
    /// Returns a configuration with these parameters and the given number of
    /// threads.
    pub fn to_config(&self, num_threads: usize) -> crate::distances::SumPathsConfig {
        crate::distances::SumPathsConfig::default()
            .num_threads(num_threads)
            .breakpoint(self.breakpoint)
            .sequential_floor(self.sequential_floor)
    }
}

/// Parses a duration such as `1d2h3m4s567`.
///
/// Each amount is followed by a unit among `d`, `h`, `m` and `s`; a trailing
/// amount without unit is in milliseconds. Whitespace is ignored.
fn parse_duration(value: &str) -> Result<Duration> {
    ensure!(
        !value.trim().is_empty(),
        "Empty duration; use 0 to log at every update"
    );
    let too_long = || anyhow!("Duration {:?} is too long", value);
    let mut millis = 0_u64;
    let mut amount: Option<u64> = None;
    for c in value.chars().filter(|c| !c.is_whitespace()) {
        if let Some(digit) = c.to_digit(10) {
            let next = amount.unwrap_or(0).checked_mul(10);
            amount = Some(next.and_then(|a| a.checked_add(digit.into())).ok_or_else(too_long)?);
            continue;
        }
        let unit: u64 = match c {
            's' => 1_000,
            'm' => 60 * 1_000,
            'h' => 60 * 60 * 1_000,
            'd' => 24 * 60 * 60 * 1_000,
            _ => bail!("Invalid duration suffix: {}", c),
        };
        let Some(amount) = amount.take() else {
            bail!("Missing amount before suffix {}", c);
        };
        millis = amount
            .checked_mul(unit)
            .and_then(|ms| millis.checked_add(ms))
            .ok_or_else(too_long)?;
    }
    if let Some(amount) = amount {
        millis = millis.checked_add(amount).ok_or_else(too_long)?;
    }
    Ok(Duration::from_millis(millis))
}

/// Initializes `env_logger` with the `info` level as default and a format
/// showing the time elapsed since initialization and the name of the thread,
/// so that messages of the workers can be told apart.
pub fn init_envlogger() -> Result<()> {
    use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};
    use jiff::SpanRound;

    let start = std::time::Instant::now();
    let printer = SpanPrinter::new()
        .spacing(Spacing::None)
        .designator(Designator::Compact);
    let span_round = SpanRound::new()
        .largest(jiff::Unit::Day)
        .smallest(jiff::Unit::Millisecond)
        .days_are_24_hours();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let now = jiff::Timestamp::try_from(SystemTime::now()).map_err(std::io::Error::other)?;
            let elapsed = jiff::Span::new()
                .milliseconds(start.elapsed().as_millis() as i64)
                .round(span_round)
                .map_err(std::io::Error::other)?;
            let style = buf.default_level_style(record.level());
            let thread = std::thread::current();
            writeln!(
                buf,
                "{} +{} {style}{:5}{style:#} [{}] {} - {}",
                now.strftime("%F %T%.3f"),
                printer.span_to_string(&elapsed),
                record.level(),
                thread.name().unwrap_or("unnamed"),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .context("Cannot initialize the logger")
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(long, value_parser = parse_duration, global = true, display_order = 1000)]
    /// Interval between progress messages (default 10s), as amounts with
    /// suffix d, h, m or s, possibly followed by milliseconds without suffix:
    /// for example, "2m30s" or "1s500".
    pub log_interval: Option<Duration>,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    Ladder(ladder::CliArgs),
    Bench(bench::CliArgs),
}

#[derive(Parser, Debug)]
#[command(name = "doublets", version=build_info::version_string())]
/// Sums the lengths of the shortest paths between all pairs of words of a
/// word list that can be transformed into one another by changing one letter
/// at a time.
#[doc = include_str!("common_env.txt")]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
    #[clap(flatten)]
    pub args: GlobalArgs,
}

/// The entry point of the command-line interface.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::parse_from(args);
    match cli.command {
        SubCommands::Ladder(args) => {
            ladder::main(cli.args, args)?;
        }
        SubCommands::Bench(args) => {
            bench::main(cli.args, args)?;
        }
    }

    log::info!(
        "The command took {}",
        pretty_print_elapsed(start.elapsed().as_secs_f64())
    );

    Ok(())
}

/// Formats a number of seconds as weeks, days, hours, minutes and seconds,
/// followed by the raw number of seconds.
pub fn pretty_print_elapsed(elapsed: f64) -> String {
    const UNITS: [(&str, u64); 4] = [
        ("week", 7 * 24 * 60 * 60),
        ("day", 24 * 60 * 60),
        ("hour", 60 * 60),
        ("minute", 60),
    ];
    let mut seconds = elapsed as u64;
    let mut result = String::new();
    for (name, length) in UNITS {
        let count = seconds / length;
        seconds %= length;
        match count {
            0 => {}
            1 => result.push_str(&format!("1 {} ", name)),
            _ => result.push_str(&format!("{} {}s ", count, name)),
        }
    }
    result.push_str(&format!("{:.3} seconds ({}s)", elapsed % 60.0, elapsed));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() -> Result<()> {
        assert_eq!(parse_duration("1500")?, Duration::from_millis(1500));
        assert_eq!(
            parse_duration("1d2h3m4s567")?,
            Duration::from_millis(93_784_567)
        );
        assert_eq!(parse_duration("2 m")?, Duration::from_secs(120));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("3w").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("99999999999999999999").is_err());
        Ok(())
    }

    #[test]
    fn test_num_threads_parser() {
        assert_eq!(num_threads_parser("8").ok(), Some(8));
        assert!(num_threads_parser("0").is_err());
        assert!(num_threads_parser("many").is_err());
    }

    #[test]
    fn test_pretty_print_elapsed() {
        assert_eq!(pretty_print_elapsed(1.5), "1.500 seconds (1.5s)");
        assert_eq!(
            pretty_print_elapsed(3723.0),
            "1 hour 2 minutes 3.000 seconds (3723s)"
        );
        assert_eq!(
            pretty_print_elapsed(1_296_000.0),
            "2 weeks 1 day 0.000 seconds (1296000s)"
        );
    }

    #[test]
    fn test_parse_ladder() -> Result<()> {
        let cli = Cli::try_parse_from([
            "doublets",
            "ladder",
            "-n",
            "4",
            "-j",
            "3",
            "--breakpoint",
            "16",
            "--log-interval",
            "1s",
            "a.txt",
            "b.txt",
        ])?;
        assert_eq!(cli.args.log_interval, Some(Duration::from_secs(1)));
        let SubCommands::Ladder(args) = cli.command else {
            bail!("Expected the ladder command");
        };
        assert_eq!(args.length, 4);
        assert_eq!(args.num_threads.num_threads, 3);
        assert_eq!(args.scheduler.breakpoint, 16);
        assert_eq!(args.files.len(), 2);
        assert!(!args.timing);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_zero_threads() {
        assert!(Cli::try_parse_from(["doublets", "bench", "path", "10", "-j", "0"]).is_err());
    }
}
