//! Builders for base-chain transactions and blocks used across tests.

use std::iter;

use bitcoin::{
    absolute::LockTime,
    block::{self, Header},
    consensus,
    hashes::Hash,
    transaction::Version,
    Amount, Block, BlockHash, CompactTarget, OutPoint, ScriptBuf, Sequence, Transaction, TxIn,
    TxMerkleNode, TxOut, Txid, Witness,
};
use overseer_primitives::{ChainParams, DEFAULT_COMMITMENT_SCRIPT_LEN};

/// Key hash the test chain commits to.
pub const TEST_COMMITMENT_SUFFIX: [u8; 20] = [0xab; 20];

pub const TEST_GENESIS_AMOUNT: Amount = Amount::from_sat(100_000);

/// Regtest difficulty, blocks built here are never mined.
const REGTEST_BITS: u32 = 0x207f_ffff;

pub fn test_chain_params() -> ChainParams {
    ChainParams::new(
        TEST_COMMITMENT_SUFFIX.to_vec(),
        DEFAULT_COMMITMENT_SCRIPT_LEN,
        TEST_GENESIS_AMOUNT,
    )
}

/// Builds a witness v0 style script of the commitment length that ends with
/// `suffix`.
pub fn commitment_script(suffix: &[u8]) -> ScriptBuf {
    let mut bytes = vec![0x00, 0x14];
    let pad = DEFAULT_COMMITMENT_SCRIPT_LEN.saturating_sub(bytes.len() + suffix.len());
    bytes.extend(iter::repeat(0u8).take(pad));
    bytes.extend_from_slice(suffix);
    ScriptBuf::from_bytes(bytes)
}

/// Output paying the test chain's commitment script.
pub fn commitment_output(amount: Amount) -> TxOut {
    TxOut {
        value: amount,
        script_pubkey: commitment_script(&TEST_COMMITMENT_SUFFIX),
    }
}

/// Output of commitment length paying some other key hash.
pub fn unrelated_output(amount: Amount) -> TxOut {
    TxOut {
        value: amount,
        script_pubkey: commitment_script(&[0xcd; 20]),
    }
}

/// Deterministic txid that no built transaction will have.
pub fn unrelated_txid(seed: u8) -> Txid {
    Txid::from_byte_array([seed; 32])
}

/// Builds a transaction whose first input spends `back_ref:salt`.
///
/// `salt` only exists to make otherwise identical transactions differ.
pub fn build_tx(back_ref: Txid, salt: u32, outputs: Vec<TxOut>) -> Transaction {
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::new(back_ref, salt),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: outputs,
    }
}

/// Builds a transaction without inputs.
pub fn build_inputless_tx(outputs: Vec<TxOut>) -> Transaction {
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: Vec::new(),
        output: outputs,
    }
}

pub fn coinbase_tx(height: u64) -> Transaction {
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: ScriptBuf::from_bytes(height.to_le_bytes().to_vec()),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: vec![TxOut {
            value: Amount::from_sat(50 * 100_000_000),
            script_pubkey: ScriptBuf::from_bytes(vec![0x6a]),
        }],
    }
}

/// Builds a block at `height` with a coinbase followed by `txs`.
pub fn build_block(height: u64, txs: Vec<Transaction>) -> Block {
    let mut txdata = vec![coinbase_tx(height)];
    txdata.extend(txs);

    let mut block = Block {
        header: Header {
            version: block::Version::ONE,
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root: TxMerkleNode::all_zeros(),
            time: height as u32,
            bits: CompactTarget::from_consensus(REGTEST_BITS),
            nonce: 0,
        },
        txdata,
    };

    if let Some(root) = block.compute_merkle_root() {
        block.header.merkle_root = root;
    }
    block
}

pub fn block_to_bytes(block: &Block) -> Vec<u8> {
    consensus::serialize(block)
}

pub fn block_to_hex(block: &Block) -> String {
    hex::encode(block_to_bytes(block))
}
