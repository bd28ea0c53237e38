// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   publish, check-git, init   (publish.rs)
//!   rpc, serve                 (serve.rs)
//!   options                    (config.rs)
//! ```

pub mod config;
pub mod publish;
pub mod serve;
