// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["repo2gh", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_publish() {
    let cli = Cli::try_parse_from(["repo2gh", "publish", "./demo", "--name", "tool", "--private"])
        .unwrap();
    let Some(Command::Publish(args)) = cli.command else {
        panic!("expected publish");
    };
    assert_eq!(args.directory, PathBuf::from("./demo"));
    assert_eq!(args.name.as_deref(), Some("tool"));
    assert_eq!(args.visibility(), Some(true));
}

#[test]
fn test_publish_visibility_flags() {
    let parse = |extra: &[&str]| {
        let mut argv = vec!["repo2gh", "publish", "dir"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).map(|cli| cli.command) {
            Ok(Some(Command::Publish(args))) => Ok(args.visibility()),
            Ok(other) => panic!("expected publish, got {other:?}"),
            Err(e) => Err(e.kind()),
        }
    };
    assert_eq!(parse(&[]), Ok(None));
    assert_eq!(parse(&["--public"]), Ok(Some(false)));
    assert_eq!(
        parse(&["--public", "--private"]),
        Err(clap::error::ErrorKind::ArgumentConflict)
    );
}

#[test]
fn test_parse_global_options_anywhere() {
    let cli = Cli::try_parse_from([
        "repo2gh",
        "-l",
        "5",
        "init",
        "dir",
        "--config",
        "a.toml",
        "-c",
        "b.toml",
        "-s",
        "publish.private=true",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(Command::Init(_))));
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert_eq!(
        cli.global.to_config_overrides(),
        [
            "publish.private=true",
            "global.output_log_level=5",
            "global.file_log_level=5",
        ]
    );
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["repo2gh", "-l", "7", "check-git"]).is_err());
}

#[test]
fn test_server_commands() {
    let rpc = Cli::try_parse_from(["repo2gh", "rpc"]).unwrap();
    assert!(matches!(rpc.command, Some(Command::Rpc)));
    let serve = Cli::try_parse_from(["repo2gh", "serve"]).unwrap();
    assert!(matches!(serve.command, Some(Command::Serve)));
    let check = Cli::try_parse_from(["repo2gh", "check-git"]).unwrap();
    assert!(matches!(check.command, Some(Command::CheckGit)));
}
