/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use doublets::cli::{cli_main, init_envlogger};

pub fn main() -> Result<()> {
    // Initialize the logger
    init_envlogger()?;
    // Call the main function of the CLI with cli args
    cli_main(std::env::args_os())
}
