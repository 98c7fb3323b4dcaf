use std::path::PathBuf;

use bitcoin::Network;
use overseer_primitives::ChainParams;
use serde::{Deserialize, Serialize};

use crate::reader::ReaderConfig;

/// Default value for `datadir` in [`ClientConfig`].
const DEFAULT_DATADIR: &str = "overseer-data";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The data directory where database contents reside.
    #[serde(default = "default_datadir")]
    pub datadir: PathBuf,

    /// Flush the database to disk after every applied block.
    #[serde(default = "default_true")]
    pub db_flush_on_commit: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            datadir: default_datadir(),
            db_flush_on_commit: true,
        }
    }
}

fn default_datadir() -> PathBuf {
    DEFAULT_DATADIR.into()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitcoindConfig {
    pub rpc_url: String,
    pub rpc_user: String,
    pub rpc_password: String,
    pub network: Network,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    pub bitcoind: BitcoindConfig,

    #[serde(default)]
    pub reader: ReaderConfig,

    pub chain: ChainParams,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use overseer_primitives::{errors::ParamsError, DEFAULT_COMMITMENT_SCRIPT_LEN};

    use super::*;
    use crate::{load_config, parse_config, ConfigError};

    const FULL_CONFIG: &str = r#"
        [client]
        datadir = "/path/to/data/directory"
        db_flush_on_commit = false

        [bitcoind]
        rpc_url = "http://localhost:18443"
        rpc_user = "overseer"
        rpc_password = "overseer"
        network = "regtest"
        retry_count = 5
        retry_interval = 500

        [reader]
        client_poll_dur_ms = 200
        start_height = 100
        follow_distance = 6

        [chain]
        commitment_suffix = "abababababababababababababababababababab"
        commitment_script_len = 22
        genesis_amount = 100000

        [logging]
        json_format = true
        log_dir = "/var/log/overseer"
        log_file_prefix = "overseer"
    "#;

    #[test]
    fn test_config_load() {
        let config = parse_config(FULL_CONFIG);
        assert!(
            config.is_ok(),
            "should be able to load TOML config but got: {:?}",
            config.err()
        );
        let config = config.unwrap();

        assert_eq!(config.client.datadir, PathBuf::from("/path/to/data/directory"));
        assert!(!config.client.db_flush_on_commit);
        assert_eq!(config.bitcoind.network, Network::Regtest);
        assert_eq!(config.bitcoind.retry_count, Some(5));
        assert_eq!(config.reader.client_poll_dur_ms, 200);
        assert_eq!(config.reader.start_height, 100);
        assert_eq!(config.reader.follow_distance, 6);
        assert_eq!(config.chain.commitment_suffix(), &[0xab; 20]);
        assert_eq!(config.logging.json_format, Some(true));
    }

    #[test]
    fn test_config_defaults() {
        let config = parse_config(
            r#"
            [bitcoind]
            rpc_url = "http://localhost:18443"
            rpc_user = "overseer"
            rpc_password = "overseer"
            network = "regtest"

            [chain]
            commitment_suffix = "0102030405060708090a0b0c0d0e0f1011121314"
            genesis_amount = 50000
            "#,
        )
        .unwrap();

        assert_eq!(config.client.datadir, PathBuf::from("overseer-data"));
        assert!(config.client.db_flush_on_commit);
        assert_eq!(config.bitcoind.retry_count, None);
        assert_eq!(config.reader.client_poll_dur_ms, 1000);
        assert_eq!(config.reader.start_height, 0);
        assert_eq!(config.reader.follow_distance, 0);
        assert_eq!(config.chain.commitment_script_len(), DEFAULT_COMMITMENT_SCRIPT_LEN);
        assert!(config.logging.log_dir.is_none());
    }

    #[test]
    fn test_config_rejects_invalid_params() {
        let res = parse_config(
            r#"
            [bitcoind]
            rpc_url = "http://localhost:18443"
            rpc_user = "overseer"
            rpc_password = "overseer"
            network = "regtest"

            [chain]
            commitment_suffix = ""
            genesis_amount = 50000
            "#,
        );

        assert!(matches!(
            res,
            Err(ConfigError::InvalidParams(ParamsError::EmptyCommitmentSuffix))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.reader.follow_distance, 6);

        let missing = load_config(&file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
