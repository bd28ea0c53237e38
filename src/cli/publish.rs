// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI arguments for the `publish` and `init` commands.
//!
//! ```text
//! $ repo2gh publish ./my-tool
//! $ repo2gh publish ./my-tool --name tool --private
//! $ repo2gh init ./my-tool
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `publish` command.
#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    /// Directory to publish.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Repository name (defaults to the directory name).
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Create a private repository.
    #[arg(long, conflicts_with = "public")]
    pub private: bool,

    /// Create a public repository.
    #[arg(long)]
    pub public: bool,
}

impl PublishArgs {
    /// Requested visibility; `None` defers to `publish.private`.
    #[must_use]
    pub const fn visibility(&self) -> Option<bool> {
        match (self.private, self.public) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Directory to initialize.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,
}
