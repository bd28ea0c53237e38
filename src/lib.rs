// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          publish / rpc / serve
//!                +----------+----------+
//!                           |
//!          +----------------+----------------+
//!          v                v                v
//!        rpc             tools           (direct)
//!     JSON-RPC 2.0    tool registry
//!          +------- stdio line loop ---------+
//!                           |
//!                           v
//!              ,---------------------------,
//!              |   publish::Publisher      |
//!              |   validate -> prepare ->  |
//!              |   create_remote -> push   |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               git        github    config
//!             gix/CLI      reqwest   TOML/env
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod logging;
pub mod publish;
pub mod rpc;
pub(crate) mod stdio;
pub mod tools;
