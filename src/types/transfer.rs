//! Settlement output types
//!
//! This module defines the transfer records produced by the settlement
//! algorithms and the settlement result that bundles them with any residual
//! imbalance.

use super::balance::{GameId, ParticipantId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places a recorded transfer amount carries
pub const CURRENCY_SCALE: u32 = 2;

/// A single peer-to-peer payment
///
/// `from` pays `amount` to `to`. The amount is always rounded to currency
/// precision when the transfer is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Debtor paying the amount
    pub from: ParticipantId,

    /// Creditor receiving the amount
    pub to: ParticipantId,

    /// Amount with exactly two decimal places
    pub amount: Decimal,
}

impl Transfer {
    /// Record a transfer, rounding the amount to currency precision
    pub fn new(
        from: impl Into<ParticipantId>,
        to: impl Into<ParticipantId>,
        amount: Decimal,
    ) -> Self {
        Transfer {
            from: from.into(),
            to: to.into(),
            amount: round_currency(amount),
        }
    }
}

/// Round to two decimal places, midpoint away from zero, keeping trailing zeros
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// Result of settling one set of balances
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settlement {
    /// Transfers in the order they were recorded
    #[serde(rename = "transactions")]
    pub transfers: Vec<Transfer>,

    /// Signed amount that could not be resolved
    ///
    /// Zero when every balance was settled. Non-zero when the input did not sum
    /// to zero: positive means creditors are left unpaid, negative means debtors
    /// are left holding money nobody claims.
    pub imbalance: Decimal,
}

impl Settlement {
    /// A settlement with no residual imbalance
    pub fn balanced(transfers: Vec<Transfer>) -> Self {
        Settlement {
            transfers,
            imbalance: Decimal::ZERO,
        }
    }

    /// Whether every balance was brought to zero
    pub fn is_balanced(&self) -> bool {
        self.imbalance.is_zero()
    }

    /// Sum of all transfer amounts, saturating at the decimal range
    pub fn total_transferred(&self) -> Decimal {
        self.transfers
            .iter()
            .fold(Decimal::ZERO, |total, t| total.saturating_add(t.amount))
    }

    /// Explanatory note for a non-zero imbalance
    pub fn imbalance_note(&self) -> Option<String> {
        if self.is_balanced() {
            None
        } else {
            Some(format!(
                "could not fully settle due to a mismatch of {}",
                self.imbalance.abs().normalize()
            ))
        }
    }
}

/// Settlement of one game from a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettlement {
    /// Game identifier
    pub game: GameId,

    /// The settlement computed for the game's balances
    #[serde(flatten)]
    pub settlement: Settlement,
}
