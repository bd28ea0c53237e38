// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!      query.rs   cmd.rs
//!          \        /
//!           v      v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .version
//!    .branch     .init / .add_all / .commit
//!    .commits    .add_remote / .remove_remote
//!                .push_upstream
//!                .status --porcelain
//! ```
//!
//! **`GixBackend`** — pure Rust, no subprocess, read-only.
//! **`ShellBackend`** — git CLI for every write and for porcelain status.

pub mod backend;
pub mod cmd;
pub mod query;

pub use backend::CommitIdentity;
