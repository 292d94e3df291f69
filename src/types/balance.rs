//! Net balance types
//!
//! A net balance is what one participant won or lost over a game:
//! cash-out minus the sum of all buy-ins.

use super::error::SettlementError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Participant identifier (a player name)
pub type ParticipantId = String;

/// Game identifier
pub type GameId = String;

/// Signed net balance of one participant
///
/// Positive amounts are owed to the participant (creditor), negative amounts
/// are owed by the participant (debtor). A zero balance is already settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalance {
    /// The participant this balance belongs to
    pub participant: ParticipantId,

    /// Signed amount
    pub amount: Decimal,
}

impl NetBalance {
    /// Create a new net balance
    pub fn new(participant: impl Into<ParticipantId>, amount: Decimal) -> Self {
        NetBalance {
            participant: participant.into(),
            amount,
        }
    }

    /// Create a net balance from a floating-point amount
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteAmount` for NaN or infinite values and `InvalidAmount`
    /// for finite values outside the range a `Decimal` can hold.
    pub fn from_f64(
        participant: impl Into<ParticipantId>,
        amount: f64,
    ) -> Result<Self, SettlementError> {
        let participant = participant.into();

        if !amount.is_finite() {
            return Err(SettlementError::non_finite_amount(amount, &participant));
        }

        let amount = Decimal::from_f64(amount)
            .ok_or_else(|| SettlementError::invalid_amount(&amount.to_string(), &participant))?;

        Ok(NetBalance {
            participant,
            amount,
        })
    }

    /// Whether this participant is owed money
    pub fn is_creditor(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Whether this participant owes money
    pub fn is_debtor(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Build an ordered balance list from `(name, amount)` pairs
///
/// Order is preserved; it decides tie-breaks during settlement.
pub fn balances_from_pairs<I, S>(pairs: I) -> Vec<NetBalance>
where
    I: IntoIterator<Item = (S, Decimal)>,
    S: Into<ParticipantId>,
{
    pairs
        .into_iter()
        .map(|(participant, amount)| NetBalance::new(participant, amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::creditor(dec!(50), true, false)]
    #[case::debtor(dec!(-20.5), false, true)]
    #[case::settled(dec!(0), false, false)]
    fn test_balance_sign(#[case] amount: Decimal, #[case] creditor: bool, #[case] debtor: bool) {
        let balance = NetBalance::new("Alice", amount);
        assert_eq!(balance.is_creditor(), creditor);
        assert_eq!(balance.is_debtor(), debtor);
    }

    #[test]
    fn test_from_f64_accepts_finite() {
        let balance = NetBalance::from_f64("Bob", -30.25).unwrap();
        assert_eq!(balance.participant, "Bob");
        assert_eq!(balance.amount, dec!(-30.25));
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::positive_infinity(f64::INFINITY)]
    #[case::negative_infinity(f64::NEG_INFINITY)]
    fn test_from_f64_rejects_non_finite(#[case] amount: f64) {
        let result = NetBalance::from_f64("Eve", amount);
        assert!(matches!(
            result,
            Err(SettlementError::NonFiniteAmount { .. })
        ));
    }

    #[test]
    fn test_balances_from_pairs_preserves_order() {
        let balances = balances_from_pairs([("C", dec!(1)), ("A", dec!(-2)), ("B", dec!(1))]);
        let names: Vec<_> = balances.iter().map(|b| b.participant.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
