use std::{fs, path::PathBuf};

use anyhow::Context;
use argh::FromArgs;
use overseer_chaintsn::BlockProcessor;
use overseer_config::Config;

use crate::{db::open_chain_db, output::output};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "apply-block")]
/// Apply one hex-encoded block from a file
pub(crate) struct ApplyBlockArgs {
    /// height to record the block at
    #[argh(option)]
    pub(crate) height: u64,

    /// file with the block as hex, as printed by `getblock <hash> 0`
    #[argh(option)]
    pub(crate) hex_file: PathBuf,
}

pub(crate) fn apply_block(config: &Config, args: ApplyBlockArgs) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.hex_file)
        .with_context(|| format!("reading block from {}", args.hex_file.display()))?;

    let db = open_chain_db(config)?;
    let processor = BlockProcessor::new(db, config.chain.clone());
    let apply_output = processor
        .apply_hex(args.height, &raw)
        .with_context(|| format!("applying block at height {}", args.height))?;

    output(&apply_output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use overseer_config::parse_config;
    use overseer_db_types::traits::ChainDatabase;
    use overseer_test_utils_btc::*;

    use super::*;

    const TEST_CONFIG: &str = r#"
        [bitcoind]
        rpc_url = "http://localhost:18443"
        rpc_user = "overseer"
        rpc_password = "overseer"
        network = "regtest"

        [chain]
        commitment_suffix = "abababababababababababababababababababab"
        genesis_amount = 100000
    "#;

    #[test]
    fn test_apply_block_from_hex_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = parse_config(TEST_CONFIG).unwrap();
        config.client.datadir = dir.path().join("data");

        let genesis = build_tx(
            unrelated_txid(1),
            0,
            vec![commitment_output(TEST_GENESIS_AMOUNT)],
        );
        let block = build_block(812, vec![genesis.clone()]);
        let hex_file = dir.path().join("block.hex");
        fs::write(&hex_file, format!("{}\n", block_to_hex(&block))).unwrap();

        apply_block(
            &config,
            ApplyBlockArgs {
                height: 812,
                hex_file,
            },
        )
        .unwrap();

        let db = open_chain_db(&config).unwrap();
        assert_eq!(db.get_processed_height().unwrap(), Some(812));
        let tip = db.get_chain_tip().unwrap().unwrap();
        assert_eq!(tip.position(), 1);
        assert_eq!(*tip.txid(), genesis.compute_txid());
    }

    #[test]
    fn test_apply_block_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = parse_config(TEST_CONFIG).unwrap();
        config.client.datadir = dir.path().join("data");

        let res = apply_block(
            &config,
            ApplyBlockArgs {
                height: 1,
                hex_file: dir.path().join("missing.hex"),
            },
        );
        assert!(res.is_err());
    }
}
