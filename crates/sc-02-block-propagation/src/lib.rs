//! # Block Propagation (sc-02)
//!
//! Four single-consumer pipelines move blocks and transactions between the
//! miners, the chain state and the transport.
//!
//! ## Architecture Role
//!
//! ```text
//! [Miners] ──outbound_blocks──→ publisher ──"blocks"──────→ [Transport]
//! [Node]   ──outbound_txs─────→ publisher ──"transactions"─→ [Transport]
//!
//! [Transport] ──Ingress::on_block───────→ inbound_blocks ──→ validator ──try_advance──→ [ChainState]
//! [Transport] ──Ingress::on_transaction─→ inbound_txs ─────→ applier ──append──────────→ [ChainState]
//! ```
//!
//! ## Rules
//!
//! - The block validator is the only caller of `ChainState::try_advance`.
//! - Inbound blocks are re-verified locally: the recomputed digest must be
//!   below the block's threshold, whoever sent it.
//! - Every drop (decode failure, publish failure, stale round, invalid
//!   proof-of-work) is logged and counted in [`PipelineMetrics`]; none of them
//!   stops a pipeline.

pub mod consumers;
pub mod errors;
pub mod ingress;
pub mod metrics;
pub mod pipelines;

pub use consumers::{apply_block, spawn_consumers, BlockVerdict};
pub use errors::PropagationError;
pub use ingress::Ingress;
pub use metrics::PipelineMetrics;
pub use pipelines::{pipelines, PipelineReceivers, PipelineSenders};
