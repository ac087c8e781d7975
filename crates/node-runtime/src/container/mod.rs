//! # Node Container
//!
//! Owns every long-lived part of a running node: chain state, the four
//! pipelines, the miner pool, the transport handle and all thread handles.
//!
//! ## Startup Order
//!
//! 1. Validate configuration and derive the threshold
//! 2. Open the genesis round and register the ingress with the transport
//! 3. Connect, polling until the transport reports ready
//! 4. Spawn the four pipeline consumers, then the miners

pub mod config;
pub mod node;

pub use config::{ChainConfig, ConfigError, MiningConfig, NodeConfig, TransportConfig};
pub use node::{NodeController, NodeStatus};
