//! Overseer: follows a Bitcoin node and indexes the canonical commitment chain
//! embedded in its blocks.

mod args;
mod cmd;
mod db;
mod output;

use std::process;

use anyhow::Context;
use args::{Args, Command, EnvArgs};
use overseer_common::logging;
use overseer_config::{load_config, Config, LoggingConfig};
use tracing::*;

fn main() {
    let args: Args = argh::from_env();
    if let Err(e) = main_inner(args) {
        eprintln!("FATAL ERROR: {e:#}");
        process::exit(1);
    }
}

fn main_inner(args: Args) -> anyhow::Result<()> {
    let config = get_config(&args)?;

    match args.cmd {
        Command::Run(cmd_args) => {
            init_logging(&config.logging)?;
            cmd::run::run(&config, cmd_args)
        }
        Command::ApplyBlock(cmd_args) => {
            init_logging(&config.logging)?;
            cmd::apply::apply_block(&config, cmd_args)
        }
        Command::GetTip(cmd_args) => cmd::query::get_tip(&config, cmd_args),
        Command::GetHeight(cmd_args) => cmd::query::get_height(&config, cmd_args),
        Command::GetEntry(cmd_args) => cmd::query::get_entry(&config, cmd_args),
        Command::GetEntries(cmd_args) => cmd::query::get_entries(&config, cmd_args),
    }
}

/// Loads the config file and applies command line overrides.
fn get_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = load_config(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;

    if let Some(datadir) = &args.datadir {
        config.client.datadir = datadir.clone();
    }

    Ok(config)
}

/// Sets up the logging system from the config file and environment.
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env_args = EnvArgs::from_env();

    // Environment label wins over the config file.
    let label = env_args
        .service_label
        .as_deref()
        .or(config.service_label.as_deref());
    let service_name = logging::format_service_name("overseer", label);

    let mut lconfig = logging::LoggerConfig::new(service_name)
        .with_json_logging(config.json_format.unwrap_or(false));

    let file_logging_config = config.log_dir.as_ref().map(|dir| {
        let prefix = config
            .log_file_prefix
            .clone()
            .unwrap_or_else(|| "overseer".to_string());
        logging::FileLoggingConfig::new(dir.clone(), prefix)
            .with_json_format(config.json_format.unwrap_or(false))
    });
    if let Some(file_config) = &file_logging_config {
        lconfig = lconfig.with_file_logging(file_config.clone());
    }

    logging::init(lconfig).context("init: logging")?;

    if let Some(file_config) = &file_logging_config {
        info!(
            log_dir = %file_config.directory.display(),
            prefix = %file_config.file_name_prefix,
            "file logging enabled"
        );
    }

    Ok(())
}
