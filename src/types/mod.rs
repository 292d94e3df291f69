//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `balance`: Participant identifiers and signed net balances
//! - `ledger`: Buy-in/cash-out records and per-game ledgers
//! - `transfer`: Transfers and settlement results
//! - `summary`: Per-player buy-in/cash-out reports
//! - `error`: Error types for the settlement engine

pub mod balance;
pub mod error;
pub mod ledger;
pub mod summary;
pub mod transfer;

pub use balance::{balances_from_pairs, GameId, NetBalance, ParticipantId};
pub use error::SettlementError;
pub use ledger::{EntryKind, GameLedger, LedgerEntry, PlayerLedger, DEFAULT_GAME};
pub use summary::{GameSummary, PlayerSummary};
pub use transfer::{round_currency, GameSettlement, Settlement, Transfer, CURRENCY_SCALE};
