//! Concurrent implementations of core components
//!
//! This module provides thread-safe counterparts of the ledger components so
//! that one ledger file holding many games can be processed in parallel.
//!
//! - **AsyncLedgerBook**: Thread-safe game ledgers using DashMap
//! - **GameProcessor**: Partitions record batches by game, applies them on
//!   tokio tasks, and settles finished games concurrently
//!
//! # Thread Safety
//!
//! Games are independent: operations on different games proceed in parallel,
//! operations on the same game are serialized by its DashMap entry.

pub mod game_processor;
pub mod ledger_book;

pub use game_processor::{GameProcessor, RecordResult};
pub use ledger_book::AsyncLedgerBook;
