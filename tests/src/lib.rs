//! # Slonocoin Test Suite
//!
//! Cross-crate scenarios that need more than one crate at a time.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── digest_benchmarks.rs   # speculative vs full block digest
//! └── src/integration/
//!     ├── support.rs             # wait_until, node factories, recording handler
//!     ├── mining_loop.rs         # mined block comes back and advances the chain
//!     ├── chain_races.rs         # stale and invalid inbound blocks
//!     ├── transactions.rs        # concurrent, submitted and malformed transactions
//!     ├── startup.rs             # connection retry and shutdown
//!     └── multi_node.rs          # nodes sharing one broker
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sc-tests
//! cargo test -p sc-tests integration::multi_node
//! cargo bench -p sc-tests
//! ```

pub mod integration;
