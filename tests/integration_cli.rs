// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use repo2gh::cli::global::GlobalOptions;
use repo2gh::cli::{Cli, Command};
use std::path::PathBuf;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["repo2gh", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["repo2gh"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Publish Command
// =============================================================================

#[test]
fn cli_publish_requires_directory() {
    let err = Cli::try_parse_from(["repo2gh", "publish"]).unwrap_err();
    assert_eq!(
        err.kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn cli_publish_short_name() {
    let cli = Cli::try_parse_from(["repo2gh", "publish", ".", "-n", "tool", "--public"]).unwrap();
    let Some(Command::Publish(args)) = cli.command else {
        panic!("expected publish");
    };
    assert_eq!(args.directory, PathBuf::from("."));
    assert_eq!(args.name.as_deref(), Some("tool"));
    assert_eq!(args.visibility(), Some(false));
}

#[test]
fn cli_token_flag() {
    let cli = Cli::try_parse_from(["repo2gh", "publish", ".", "--github-token", "abc"]).unwrap();
    assert_eq!(cli.global.github_token.as_deref(), Some("abc"));
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn global_overrides_file_level_follows_console_level() {
    let options = GlobalOptions {
        log_level: Some(2),
        log_file: Some(PathBuf::from("out.log")),
        ..GlobalOptions::default()
    };
    assert_eq!(
        options.to_config_overrides(),
        [
            "global.output_log_level=2",
            "global.file_log_level=2",
            "global.log_file=out.log",
        ]
    );
}

#[test]
fn global_overrides_explicit_file_level() {
    let options = GlobalOptions {
        log_level: Some(1),
        file_log_level: Some(5),
        options: vec!["publish.remote=github".to_string()],
        ..GlobalOptions::default()
    };
    assert_eq!(
        options.to_config_overrides(),
        [
            "publish.remote=github",
            "global.output_log_level=1",
            "global.file_log_level=5",
        ]
    );
}
