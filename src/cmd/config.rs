// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for repo2gh.

use crate::config::Config;

/// Display current configuration options.
pub fn run_options_command(config: &Config, config_files: &[String]) {
    for line in config.format_options() {
        println!("{line}");
    }
    if !config_files.is_empty() {
        println!();
        println!("Loaded configuration files:");
        for line in config_files {
            println!("  {line}");
        }
    }
}
