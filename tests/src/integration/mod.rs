//! Node-level scenarios over the in-memory broker.

pub mod support;

mod chain_races;
mod mining_loop;
mod multi_node;
mod startup;
mod transactions;
