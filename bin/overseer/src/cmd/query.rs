use argh::FromArgs;
use overseer_config::Config;
use overseer_db_types::traits::ChainDatabase;
use overseer_primitives::ChainPosition;

use crate::{
    db::open_chain_db,
    output::{output, EntryList, HeightInfo},
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-tip")]
/// Get the entry at the tip of the chain
pub(crate) struct GetTipArgs {}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-height")]
/// Get the last fully applied block height
pub(crate) struct GetHeightArgs {}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-entry")]
/// Get the entry at a chain position
pub(crate) struct GetEntryArgs {
    /// chain position, starting at 1
    #[argh(option)]
    pub(crate) position: ChainPosition,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-entries")]
/// Get the entries in a position range
pub(crate) struct GetEntriesArgs {
    /// first position, inclusive
    #[argh(option)]
    pub(crate) start: ChainPosition,

    /// last position, exclusive
    #[argh(option)]
    pub(crate) end: ChainPosition,
}

pub(crate) fn get_tip(config: &Config, _args: GetTipArgs) -> anyhow::Result<()> {
    let db = open_chain_db(config)?;
    match db.get_chain_tip()? {
        Some(entry) => output(&entry),
        None => println!("chain not started"),
    }
    Ok(())
}

pub(crate) fn get_height(config: &Config, _args: GetHeightArgs) -> anyhow::Result<()> {
    let db = open_chain_db(config)?;
    output(&HeightInfo(db.get_processed_height()?));
    Ok(())
}

pub(crate) fn get_entry(config: &Config, args: GetEntryArgs) -> anyhow::Result<()> {
    let db = open_chain_db(config)?;
    let entry = db
        .get_entry_at(args.position)?
        .ok_or_else(|| anyhow::anyhow!("no entry at position {}", args.position))?;
    output(&entry);
    Ok(())
}

pub(crate) fn get_entries(config: &Config, args: GetEntriesArgs) -> anyhow::Result<()> {
    let db = open_chain_db(config)?;
    output(&EntryList(db.get_entries_range(args.start, args.end)?));
    Ok(())
}
