//! Poker Settlement Engine Library
//! # Overview
//!
//! This library turns poker game ledgers into a short list of peer-to-peer
//! payments that settle every player's debt, with both a sync and an async
//! processing strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (NetBalance, Transfer, Settlement, ledgers, summaries)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - The greedy max/min settlement algorithm
//!   - [`core::largest_first`] - The largest-first bucket algorithm
//!   - [`core::ledger_book`] - Per-game ledgers built from CSV records
//!   - [`core::coordinator`] - Validation and settlement orchestration
//! - [`io`] - CSV input, CSV and JSON output
//! - [`strategy`] - Complete sync and async pipelines
//!
//! # Ledger Records
//!
//! - **buyin**: Money a player put on the table (may appear several times)
//! - **cashout**: Chips a player took off the table (the last one counts)
//! - **net**: An already computed signed net balance, for ad hoc games
//!
//! # Settlement
//!
//! A player's net balance is `cash_out - total_buy_in`. Positive players are
//! owed money, negative players owe it. The engine repeatedly matches the
//! largest creditor with the largest debtor and emits a transfer for the
//! smaller of the two magnitudes, rounded to cents. Whatever cannot be
//! matched because the balances do not sum to zero is reported as the
//! settlement's imbalance.
//!
//! # Reports
//!
//! The default report lists the transfers of every game. The summary report
//! lists each player's buy-ins, cash-out and net balance instead.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{settle, LedgerBook, SettlementCoordinator};
pub use io::{
    write_settlements_csv, write_settlements_json, write_summaries_csv, write_summaries_json,
};
pub use types::{
    GameId, GameSettlement, GameSummary, LedgerEntry, NetBalance, ParticipantId, PlayerSummary,
    Settlement, SettlementError, Transfer,
};
