//! Core business logic module
//!
//! This module contains the settlement components:
//! - `traits` - Trait abstractions for interchangeable implementations
//! - `engine` - The max/min settlement engine (default algorithm)
//! - `largest_first` - The largest-first bucket settlement
//! - `ledger_book` - Per-game ledgers built from buy-in/cash-out records
//! - `coordinator` - Validation and orchestration around the algorithms
//! - `async` - Concurrent implementations for multi-game ledgers

pub mod r#async;
pub mod coordinator;
pub mod engine;
pub mod largest_first;
pub mod ledger_book;
pub mod traits;

pub use coordinator::{SettlementConfig, SettlementCoordinator};
pub use engine::{settle, MaxMinSettlement, SETTLEMENT_EPSILON};
pub use largest_first::LargestFirstSettlement;
pub use ledger_book::LedgerBook;
pub use r#async::{AsyncLedgerBook, GameProcessor};
pub use traits::{GameBook, SettlementAlgorithm};

use crate::cli::AlgorithmType;

/// Create a settlement algorithm of the requested type
pub fn create_algorithm(algorithm_type: AlgorithmType) -> Box<dyn SettlementAlgorithm> {
    match algorithm_type {
        AlgorithmType::MaxMin => Box::new(MaxMinSettlement),
        AlgorithmType::LargestFirst => Box::new(LargestFirstSettlement),
    }
}
