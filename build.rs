/*
 * SPDX-FileCopyrightText: 2025 Doublets contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

fn main() {
    // Collects version, git and compiler information for `--version`
    built::write_built_file().expect("Failed to acquire build-time information");
}
