// repo2gh: publish local directories to GitHub
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config (files, env, --set) --> Logging --> Command Dispatch
//!   Publish | CheckGit | Init | Rpc | Serve | Options | Version
//! ```

use std::process::ExitCode;

use repo2gh::cli::global::GlobalOptions;
use repo2gh::cli::{self, Command};
use repo2gh::cmd::config::run_options_command;
use repo2gh::cmd::publish::{run_check_git_command, run_init_command, run_publish_command};
use repo2gh::cmd::serve::{run_rpc_command, run_serve_command};
use repo2gh::config::Config;
use repo2gh::config::loader::ConfigLoader;
use repo2gh::config::types::GlobalConfig;
use repo2gh::logging::init_logging;
use repo2gh::logging::LogConfig;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Configuration file picked up from the working directory.
const DEFAULT_CONFIG_FILE: &str = "repo2gh.toml";

/// Prefix of `REPO2GH_<SECTION>__<KEY>` overrides.
const ENV_PREFIX: &str = "REPO2GH";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let config_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config, &config_files).await
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, config_files: &[String]) -> ExitCode {
    let token = cli.global.github_token.as_deref();

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config, config_files);
            Ok(())
        }
        Some(Command::Publish(args)) => run_publish_command(args, config, token).await,
        Some(Command::CheckGit) => run_check_git_command(config),
        Some(Command::Init(args)) => run_init_command(args, config),
        Some(Command::Rpc) => run_rpc_command(config).await,
        Some(Command::Serve) => run_serve_command(config, token).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> repo2gh::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}
