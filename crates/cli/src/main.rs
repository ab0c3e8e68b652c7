// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sbm - sing-box client manager

mod adapters;
mod commands;
mod console;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{edit, records, server};
use error::CliError;
use output::OutputFormat;
use sbm_core::Settings;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "sbm",
    version,
    about = "sing-box client manager - edit the users of a VLESS inbound"
)]
struct Cli {
    #[command(flatten)]
    overrides: SettingsArgs,

    /// Output format for scripted commands
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Settings file location and per-invocation overrides
#[derive(Args)]
struct SettingsArgs {
    /// Settings file (missing file means defaults)
    #[arg(long, global = true, default_value = "settings.toml")]
    settings: PathBuf,
    /// Server config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Client roster file
    #[arg(long, global = true)]
    table: Option<PathBuf>,
    /// Directory receiving backups
    #[arg(long, global = true)]
    backup_dir: Option<PathBuf>,
    /// Tag of the managed inbound
    #[arg(long, global = true)]
    vless_tag: Option<String>,
    /// Server container name
    #[arg(long, global = true)]
    container: Option<String>,
    /// Server image used for config checks
    #[arg(long, global = true)]
    docker_image: Option<String>,
}

impl SettingsArgs {
    fn load(self) -> Result<Settings, CliError> {
        let mut settings = Settings::load(&self.settings).map_err(CliError::settings)?;
        if let Some(config) = self.config {
            settings.config_path = config;
        }
        if let Some(table) = self.table {
            settings.clients_table = table;
        }
        if let Some(dir) = self.backup_dir {
            settings.backup_dir = Some(dir);
        }
        if let Some(tag) = self.vless_tag {
            settings.vless_tag = tag;
        }
        if let Some(container) = self.container {
            settings.container = container;
        }
        if let Some(image) = self.docker_image {
            settings.docker_image = image;
        }
        Ok(settings)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive console (the default)
    Edit,
    /// List clients
    List,
    /// Add a client and save
    Add(records::AddArgs),
    /// Rename a client and save
    Rename(records::RenameArgs),
    /// Delete a client and save
    Delete(records::DeleteArgs),
    /// Validate the server config on disk
    Check,
    /// Restart the server container
    Restart,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) => eprint!("{}", cli_err),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = cli.overrides.load()?;
    let _log_guard = logging::setup_logging(settings.log_file.as_deref())?;
    let format = cli.format;

    match cli.command.unwrap_or(Commands::Edit) {
        Commands::Edit => edit::handle(&settings).await,
        Commands::List => records::list(&settings, format),
        Commands::Add(args) => records::add(&settings, args, format).await,
        Commands::Rename(args) => records::rename(&settings, args, format).await,
        Commands::Delete(args) => records::delete(&settings, args, format).await,
        Commands::Check => server::check(&settings, format).await,
        Commands::Restart => server::restart(&settings, format).await,
    }
}
