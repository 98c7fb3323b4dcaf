use std::{env, path::PathBuf};

use argh::FromArgs;
use overseer_common::logging::SVC_LABEL_ENV;

use crate::cmd::{
    apply::ApplyBlockArgs,
    query::{GetEntriesArgs, GetEntryArgs, GetHeightArgs, GetTipArgs},
    run::RunArgs,
};

/// Configs overridable by environment.
#[derive(Debug, Clone)]
pub(crate) struct EnvArgs {
    /// Service label to include in service name
    pub service_label: Option<String>,
}

impl EnvArgs {
    pub(crate) fn from_env() -> Self {
        Self {
            service_label: env::var(SVC_LABEL_ENV).ok(),
        }
    }
}

#[derive(Debug, FromArgs)]
#[argh(description = "Canonical commitment chain indexer")]
pub(crate) struct Args {
    #[argh(option, short = 'c', description = "path to configuration")]
    pub config: PathBuf,

    #[argh(
        option,
        short = 'd',
        description = "datadir path, overrides the config file"
    )]
    pub datadir: Option<PathBuf>,

    #[argh(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, PartialEq, FromArgs)]
#[argh(subcommand)]
pub(crate) enum Command {
    Run(RunArgs),
    ApplyBlock(ApplyBlockArgs),
    GetTip(GetTipArgs),
    GetHeight(GetHeightArgs),
    GetEntry(GetEntryArgs),
    GetEntries(GetEntriesArgs),
}
