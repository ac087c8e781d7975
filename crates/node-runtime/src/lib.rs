//! # Node Runtime Library
//!
//! Wires the chain state, the miner pool and the propagation pipelines to a
//! transport. The `node-runtime` binary runs one node against the in-memory
//! loopback broker.

pub mod container;
pub mod error;

pub use container::{
    ChainConfig, ConfigError, MiningConfig, NodeConfig, NodeController, NodeStatus,
    TransportConfig,
};
pub use error::{NodeError, Result};
