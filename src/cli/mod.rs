// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for repo2gh using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! repo2gh [global options] <command>
//! publish <DIR> [--name N] [--private|--public]
//! check-git
//! init <DIR>
//! rpc
//! serve
//! options
//! version
//! ```

pub mod global;
pub mod publish;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::publish::{InitArgs, PublishArgs};
use clap::{Parser, Subcommand};

/// Publish a local directory as a new GitHub repository.
#[derive(Debug, Parser)]
#[command(
    name = "repo2gh",
    author,
    version,
    about = "Publish a local directory as a new GitHub repository",
    long_about = "repo2gh Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Turns a directory into a git repository if needed, commits\n\
                  pending changes, creates a repository on GitHub and pushes to it.\n\n\
                  `repo2gh publish some/dir` does everything. `repo2gh rpc` and\n\
                  `repo2gh serve` expose the same operations on stdin/stdout.",
    after_help = "CONFIGURATION:\n\n\
                  repo2gh reads `repo2gh.toml` from the current directory when it\n\
                  exists, then every --config file in order, then REPO2GH_* environment\n\
                  variables (e.g. REPO2GH_PUBLISH__PRIVATE=true), then --set options.\n\
                  The API token comes from --github-token, GITHUB_TOKEN or github.token."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Publishes a directory to a new GitHub repository.
    Publish(PublishArgs),

    /// Checks that git is installed.
    #[command(name = "check-git")]
    CheckGit,

    /// Initializes a directory as a git repository and commits its files.
    Init(InitArgs),

    /// Serves JSON-RPC 2.0 requests on stdin/stdout.
    Rpc,

    /// Serves registered tools on stdin/stdout.
    Serve,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
