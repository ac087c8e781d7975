//! # Node Configuration
//!
//! Startup parameters for the transport, the chain and the miner pool.
//!
//! Every value has a default. `NodeConfig::from_env` overrides them from
//! `SC_*` environment variables; a value that does not parse is logged and
//! the default kept.

use shared_types::U256;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Broker address used when `SC_BROKER_URI` is not set.
pub const DEFAULT_BROKER_URI: &str = "tcp://localhost:2000";
/// Client identity used when `SC_NODE_ID` is not set.
pub const DEFAULT_NODE_ID: &str = "InvMiner2";
/// Chain protocol version used when `SC_CHAIN_VERSION` is not set.
pub const DEFAULT_CHAIN_VERSION: &str = "0.0.1";
/// Difficulty divisor used when `SC_DIFFICULTY_DIVISOR` is not set.
pub const DEFAULT_DIFFICULTY_DIVISOR: u64 = 65_535;
/// Connection poll interval used when `SC_CONNECT_RETRY_MS` is not set.
pub const DEFAULT_CONNECT_RETRY: Duration = Duration::from_secs(5);

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Transport configuration.
    pub transport: TransportConfig,
    /// Chain configuration.
    pub chain: ChainConfig,
    /// Miner pool configuration.
    pub mining: MiningConfig,
}

impl NodeConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `SC_*` key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(uri) = lookup("SC_BROKER_URI") {
            config.transport.broker_uri = uri;
        }
        if let Some(node_id) = lookup("SC_NODE_ID") {
            config.transport.node_id = node_id;
        }
        if let Some(raw) = lookup("SC_CONNECT_RETRY_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.transport.connect_retry = Duration::from_millis(ms),
                Err(e) => warn!(key = "SC_CONNECT_RETRY_MS", %raw, error = %e, "Ignoring invalid value"),
            }
        }
        if let Some(version) = lookup("SC_CHAIN_VERSION") {
            config.chain.version = version;
        }
        if let Some(raw) = lookup("SC_DIFFICULTY_DIVISOR") {
            match U256::from_dec_str(&raw) {
                Ok(divisor) => config.chain.difficulty_divisor = divisor,
                Err(e) => {
                    warn!(key = "SC_DIFFICULTY_DIVISOR", %raw, error = ?e, "Ignoring invalid value")
                }
            }
        }
        if let Some(raw) = lookup("SC_MINER_THREADS") {
            match raw.parse::<usize>() {
                Ok(threads) => config.mining.threads = threads,
                Err(e) => warn!(key = "SC_MINER_THREADS", %raw, error = %e, "Ignoring invalid value"),
            }
        }

        info!(
            broker = %config.transport.broker_uri,
            node_id = %config.transport.node_id,
            version = %config.chain.version,
            divisor = %config.chain.difficulty_divisor,
            threads = config.mining.threads,
            "Configuration loaded"
        );
        config
    }

    /// Reject values the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.node_id.is_empty() {
            return Err(ConfigError::EmptyNodeId);
        }
        if self.chain.difficulty_divisor.is_zero() {
            return Err(ConfigError::ZeroDivisor);
        }
        if self.mining.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The transport needs a client identity.
    #[error("Node id must not be empty (SC_NODE_ID)")]
    EmptyNodeId,
    /// `U256::MAX / 0` has no threshold.
    #[error("Difficulty divisor must be at least 1 (SC_DIFFICULTY_DIVISOR)")]
    ZeroDivisor,
    /// A miner pool needs at least one thread.
    #[error("Miner thread count must be at least 1 (SC_MINER_THREADS)")]
    ZeroThreads,
}

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Broker address.
    pub broker_uri: String,
    /// Client identity presented to the broker.
    pub node_id: String,
    /// Delay between connection polls at startup.
    pub connect_retry: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            broker_uri: DEFAULT_BROKER_URI.to_string(),
            node_id: DEFAULT_NODE_ID.to_string(),
            connect_retry: DEFAULT_CONNECT_RETRY,
        }
    }
}

/// Chain configuration.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Protocol version stamped on every block.
    pub version: String,
    /// Threshold is `U256::MAX / difficulty_divisor`.
    pub difficulty_divisor: U256,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_CHAIN_VERSION.to_string(),
            difficulty_divisor: U256::from(DEFAULT_DIFFICULTY_DIVISOR),
        }
    }
}

/// Miner pool configuration.
#[derive(Debug, Clone)]
pub struct MiningConfig {
    /// Number of miner threads.
    pub threads: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get().max(1),
        }
    }
}
