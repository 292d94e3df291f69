//! Error types for the settlement engine
//!
//! This module defines the errors that can occur while reading ledger records,
//! deriving net balances and preparing a game for settlement. The settlement
//! algorithms themselves never fail: a non-zero-sum input is reported through
//! the settlement's imbalance instead.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Ledger Errors**: Unknown record types, mixed entry kinds, duplicates
//! - **Game Errors**: Missing cash-outs, unbalanced ad hoc balances
//! - **Arithmetic Errors**: Overflow while summing buy-ins or balances

use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Main error type for the settlement engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable: the malformed record is skipped.
    #[error("CSV parse error{}: {message}", .line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Record type other than buyin, cashout or net
    #[error("Invalid record type '{record_type}' for player '{player}'")]
    InvalidRecordType {
        /// The invalid record type string
        record_type: String,
        /// Player named on the record
        player: String,
    },

    /// Amount column is empty
    #[error("{record_type} record for player '{player}' requires an amount")]
    MissingAmount {
        /// Record type that requires an amount
        record_type: String,
        /// Player named on the record
        player: String,
    },

    /// Amount is malformed, or negative where only non-negative amounts make sense
    #[error("Invalid amount '{amount}' for player '{player}'")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
        /// Player named on the record
        player: String,
    },

    /// A floating-point balance was NaN or infinite
    #[error("Non-finite amount {value} for player '{player}'")]
    NonFiniteAmount {
        /// Textual form of the rejected value
        value: String,
        /// Player the value belongs to
        player: String,
    },

    /// Participant identifier is empty after trimming
    #[error("Participant name cannot be empty in game '{game}'")]
    EmptyParticipant {
        /// Game the record belongs to
        game: String,
    },

    /// The same participant reported two net balances in one game
    #[error("Duplicate net balance for player '{player}' in game '{game}'")]
    DuplicateParticipant {
        /// Game identifier
        game: String,
        /// Duplicated participant
        player: String,
    },

    /// A reported net balance was mixed with buy-in or cash-out records
    #[error("Player '{player}' in game '{game}' mixes net balances with buy-ins or cash-outs")]
    MixedEntries {
        /// Game identifier
        game: String,
        /// Offending participant
        player: String,
    },

    /// Some players bought in but never cashed out
    #[error("Game '{game}' has players missing cash-out: {}", .players.join(", "))]
    MissingCashOut {
        /// Game identifier
        game: String,
        /// Players without a cash-out, in ledger order
        players: Vec<String>,
    },

    /// Ad hoc net balances do not sum to zero within tolerance
    #[error("Net balances for game '{game}' must sum to zero (sum {sum}, tolerance {tolerance})")]
    UnbalancedInput {
        /// Game identifier
        game: String,
        /// Actual sum of the balances
        sum: Decimal,
        /// Accepted tolerance
        tolerance: Decimal,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for player '{player}'")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Player whose amounts overflowed
        player: String,
    },
}

impl From<std::io::Error> for SettlementError {
    fn from(error: std::io::Error) -> Self {
        SettlementError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for SettlementError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SettlementError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SettlementError {
    /// Create the error for an input file that could not be opened
    ///
    /// A missing file becomes `FileNotFound`, anything else an `IoError`.
    pub fn open_failed(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => SettlementError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => SettlementError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            },
        }
    }

    /// Create an IoError with a short description of what failed
    pub fn io_error(context: &str, error: impl Display) -> Self {
        SettlementError::IoError {
            message: format!("{}: {}", context, error),
        }
    }

    /// Attach a line number to a record-level error
    ///
    /// Parse errors that already carry a line are returned unchanged.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            SettlementError::ParseError {
                line: Some(_), ..
            } => self,
            SettlementError::ParseError {
                line: None,
                message,
            } => SettlementError::ParseError {
                line: Some(line),
                message,
            },
            other => SettlementError::ParseError {
                line: Some(line),
                message: other.to_string(),
            },
        }
    }

    /// Create an InvalidRecordType error
    pub fn invalid_record_type(record_type: &str, player: &str) -> Self {
        SettlementError::InvalidRecordType {
            record_type: record_type.to_string(),
            player: player.to_string(),
        }
    }

    /// Create a MissingAmount error
    pub fn missing_amount(record_type: &str, player: &str) -> Self {
        SettlementError::MissingAmount {
            record_type: record_type.to_string(),
            player: player.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, player: &str) -> Self {
        SettlementError::InvalidAmount {
            amount: amount.to_string(),
            player: player.to_string(),
        }
    }

    /// Create a NonFiniteAmount error
    pub fn non_finite_amount(value: f64, player: &str) -> Self {
        SettlementError::NonFiniteAmount {
            value: value.to_string(),
            player: player.to_string(),
        }
    }

    /// Create an EmptyParticipant error
    pub fn empty_participant(game: &str) -> Self {
        SettlementError::EmptyParticipant {
            game: game.to_string(),
        }
    }

    /// Create a DuplicateParticipant error
    pub fn duplicate_participant(game: &str, player: &str) -> Self {
        SettlementError::DuplicateParticipant {
            game: game.to_string(),
            player: player.to_string(),
        }
    }

    /// Create a MixedEntries error
    pub fn mixed_entries(game: &str, player: &str) -> Self {
        SettlementError::MixedEntries {
            game: game.to_string(),
            player: player.to_string(),
        }
    }

    /// Create a MissingCashOut error
    pub fn missing_cash_out(game: &str, players: Vec<String>) -> Self {
        SettlementError::MissingCashOut {
            game: game.to_string(),
            players,
        }
    }

    /// Create an UnbalancedInput error
    pub fn unbalanced_input(game: &str, sum: Decimal, tolerance: Decimal) -> Self {
        SettlementError::UnbalancedInput {
            game: game.to_string(),
            sum,
            tolerance,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, player: &str) -> Self {
        SettlementError::ArithmeticOverflow {
            operation: operation.to_string(),
            player: player.to_string(),
        }
    }
}
