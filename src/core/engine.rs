//! Settlement engine
//!
//! Greedy minimum cash flow: on every step the largest remaining creditor is
//! paid by the largest remaining debtor, for as much as the smaller of the two
//! can cover. Each step brings at least one participant to exactly zero, so
//! `N` participants with a non-zero balance need at most `N - 1` transfers.
//!
//! The extremes are found by a linear scan on every step. For the handful of
//! players at a poker table this is cheaper than keeping a sorted structure,
//! and it makes the tie-break trivial: the first participant in input order
//! wins.

use crate::core::traits::SettlementAlgorithm;
use crate::types::{NetBalance, Settlement, Transfer};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Balances within this distance of zero count as settled
pub const SETTLEMENT_EPSILON: Decimal = dec!(0.000000001);

/// Settle balances by repeatedly matching the largest creditor with the largest debtor
///
/// The caller's balances are copied into a local buffer and never modified.
///
/// # Arguments
///
/// * `balances` - Net balances in a meaningful order; ties between equal
///   balances go to the participant listed first
///
/// # Returns
///
/// The transfers in the order they were found, one per step, and the
/// imbalance: zero when everything settled, otherwise the sum of whatever was
/// left once no positive transfer was possible. A step smaller than half a
/// cent is still recorded, with an amount of `0.00`.
///
/// # Examples
///
/// ```
/// use poker_settlement_engine::core::engine::settle;
/// use poker_settlement_engine::types::NetBalance;
/// use rust_decimal_macros::dec;
///
/// let balances = vec![
///     NetBalance::new("A", dec!(50)),
///     NetBalance::new("B", dec!(-30)),
///     NetBalance::new("C", dec!(-20)),
/// ];
/// let settlement = settle(&balances);
///
/// assert_eq!(settlement.transfers.len(), 2);
/// assert!(settlement.is_balanced());
/// ```
pub fn settle(balances: &[NetBalance]) -> Settlement {
    let mut amounts: Vec<Decimal> = balances.iter().map(|b| b.amount).collect();
    let mut transfers = Vec::new();

    while let Some((creditor, debtor)) = extremes(&amounts) {
        let credit = amounts[creditor];
        let debt = amounts[debtor];

        if credit.abs() <= SETTLEMENT_EPSILON && debt.abs() <= SETTLEMENT_EPSILON {
            break;
        }

        // Only same-signed leftovers remain: the input did not sum to zero.
        if credit <= SETTLEMENT_EPSILON || debt >= -SETTLEMENT_EPSILON {
            let imbalance = residual(amounts.iter().copied());
            return Settlement {
                transfers,
                imbalance,
            };
        }

        let amount = credit.min(-debt);
        amounts[creditor] -= amount;
        amounts[debtor] += amount;

        transfers.push(Transfer::new(
            balances[debtor].participant.clone(),
            balances[creditor].participant.clone(),
            amount,
        ));
    }

    Settlement::balanced(transfers)
}

/// Signed sum of the amounts left open
///
/// Saturates at the bounds of `Decimal` instead of overflowing, so balances
/// near the edge of the range still produce a settlement.
pub(crate) fn residual(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        total = match total.checked_add(amount) {
            Some(sum) => sum,
            None => {
                log::warn!("Imbalance exceeds the decimal range, saturating");
                total.saturating_add(amount)
            }
        };
    }
    total
}

/// Indices of the maximum and minimum amounts, first occurrence winning ties
fn extremes(amounts: &[Decimal]) -> Option<(usize, usize)> {
    let (first, rest) = amounts.split_first()?;
    let (mut max_idx, mut max) = (0, *first);
    let (mut min_idx, mut min) = (0, *first);

    for (offset, amount) in rest.iter().enumerate() {
        if *amount > max {
            max = *amount;
            max_idx = offset + 1;
        }
        if *amount < min {
            min = *amount;
            min_idx = offset + 1;
        }
    }

    Some((max_idx, min_idx))
}

/// Global max/min settlement, the default algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxMinSettlement;

impl SettlementAlgorithm for MaxMinSettlement {
    fn settle(&self, balances: &[NetBalance]) -> Settlement {
        settle(balances)
    }

    fn name(&self) -> &'static str {
        "max-min"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::balances_from_pairs;
    use rstest::rstest;

    fn transfer(from: &str, to: &str, amount: Decimal) -> Transfer {
        Transfer::new(from, to, amount)
    }

    #[test]
    fn test_three_players_two_transfers() {
        let balances = balances_from_pairs([("A", dec!(50)), ("B", dec!(-30)), ("C", dec!(-20))]);

        let settlement = settle(&balances);

        assert_eq!(
            settlement.transfers,
            vec![transfer("B", "A", dec!(30)), transfer("C", "A", dec!(20))]
        );
        assert_eq!(settlement.imbalance, Decimal::ZERO);
    }

    #[test]
    fn test_already_balanced_needs_no_transfers() {
        let balances = balances_from_pairs([("A", dec!(0)), ("B", dec!(0))]);

        let settlement = settle(&balances);

        assert!(settlement.transfers.is_empty());
        assert_eq!(settlement.imbalance, Decimal::ZERO);
    }

    #[test]
    fn test_empty_input() {
        let settlement = settle(&[]);
        assert_eq!(settlement, Settlement::default());
    }

    #[test]
    fn test_eight_players_seven_transfers() {
        let balances = balances_from_pairs([
            ("Alice", dec!(500)),
            ("Bob", dec!(-220)),
            ("Charlie", dec!(-180)),
            ("Dave", dec!(100)),
            ("Eve", dec!(-50)),
            ("Frank", dec!(-150)),
            ("Grace", dec!(300)),
            ("Hank", dec!(-300)),
        ]);

        let settlement = settle(&balances);

        assert_eq!(
            settlement.transfers,
            vec![
                transfer("Hank", "Alice", dec!(300)),
                transfer("Bob", "Grace", dec!(220)),
                transfer("Charlie", "Alice", dec!(180)),
                transfer("Frank", "Dave", dec!(100)),
                transfer("Eve", "Grace", dec!(50)),
                transfer("Frank", "Grace", dec!(30)),
                transfer("Frank", "Alice", dec!(20)),
            ]
        );
        assert!(settlement.is_balanced());
    }

    #[test]
    fn test_drift_reported_as_imbalance() {
        let balances = balances_from_pairs([("A", dec!(100)), ("B", dec!(-100.000001))]);

        let settlement = settle(&balances);

        assert_eq!(settlement.transfers, vec![transfer("B", "A", dec!(100))]);
        assert_eq!(settlement.transfers[0].amount.to_string(), "100.00");
        assert_eq!(settlement.imbalance, dec!(-0.000001));
    }

    #[test]
    fn test_drift_below_epsilon_is_ignored() {
        let balances = balances_from_pairs([("A", dec!(100)), ("B", dec!(-100.0000000001))]);

        let settlement = settle(&balances);

        assert_eq!(settlement.transfers.len(), 1);
        assert_eq!(settlement.imbalance, Decimal::ZERO);
    }

    #[rstest]
    #[case::only_creditors(&[("A", dec!(10)), ("B", dec!(5))], dec!(15))]
    #[case::only_debtors(&[("A", dec!(-10)), ("B", dec!(-5))], dec!(-15))]
    #[case::creditors_left_over(&[("A", dec!(60)), ("B", dec!(-50)), ("C", dec!(5))], dec!(15))]
    fn test_non_zero_sum_degrades_gracefully(
        #[case] pairs: &[(&str, Decimal)],
        #[case] expected_imbalance: Decimal,
    ) {
        let balances = balances_from_pairs(pairs.iter().copied());

        let settlement = settle(&balances);

        assert_eq!(settlement.imbalance, expected_imbalance);
        assert!(settlement.transfers.iter().all(|t| t.amount > Decimal::ZERO));
    }

    #[test]
    fn test_ties_go_to_first_listed() {
        let balances = balances_from_pairs([
            ("A", dec!(10)),
            ("B", dec!(10)),
            ("C", dec!(-10)),
            ("D", dec!(-10)),
        ]);

        let settlement = settle(&balances);

        assert_eq!(
            settlement.transfers,
            vec![transfer("C", "A", dec!(10)), transfer("D", "B", dec!(10))]
        );
    }

    #[test]
    fn test_input_order_changes_pairing_not_count() {
        let forward = balances_from_pairs([("A", dec!(10)), ("B", dec!(10)), ("C", dec!(-20))]);
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        let a = settle(&forward);
        let b = settle(&reversed);

        assert_eq!(a.transfers[0], transfer("C", "A", dec!(10)));
        assert_eq!(b.transfers[0], transfer("C", "B", dec!(10)));
        assert_eq!(a.transfers.len(), b.transfers.len());
    }

    #[test]
    fn test_rounding_happens_at_recording() {
        let balances = balances_from_pairs([
            ("A", dec!(10.004)),
            ("B", dec!(10.004)),
            ("C", dec!(-20.008)),
        ]);

        let settlement = settle(&balances);

        assert_eq!(
            settlement.transfers,
            vec![transfer("C", "A", dec!(10.00)), transfer("C", "B", dec!(10.00))]
        );
        assert!(settlement.is_balanced());
    }

    #[test]
    fn test_sub_cent_steps_are_still_recorded() {
        let balances = balances_from_pairs([
            ("A", dec!(0.004)),
            ("B", dec!(0.004)),
            ("C", dec!(-0.008)),
        ]);

        let settlement = settle(&balances);

        assert_eq!(
            settlement.transfers,
            vec![transfer("C", "A", dec!(0)), transfer("C", "B", dec!(0))]
        );
        assert_eq!(settlement.transfers[0].amount.to_string(), "0.00");
        assert!(settlement.is_balanced());
    }

    #[test]
    fn test_imbalance_saturates_at_decimal_range() {
        let balances = balances_from_pairs([("A", Decimal::MAX), ("B", Decimal::MAX)]);

        let settlement = settle(&balances);

        assert!(settlement.transfers.is_empty());
        assert_eq!(settlement.imbalance, Decimal::MAX);
        assert!(settlement.imbalance_note().is_some());
    }

    #[rstest]
    #[case::positive(&[Decimal::MAX, dec!(1)], Decimal::MAX)]
    #[case::negative(&[Decimal::MIN, dec!(-1), dec!(-1)], Decimal::MIN)]
    #[case::in_range(&[dec!(1.5), dec!(-0.5)], dec!(1))]
    fn test_residual_saturates(#[case] amounts: &[Decimal], #[case] expected: Decimal) {
        assert_eq!(residual(amounts.iter().copied()), expected);
    }

    #[test]
    fn test_caller_balances_untouched() {
        let balances = balances_from_pairs([("A", dec!(50)), ("B", dec!(-50))]);
        let copy = balances.clone();

        let _ = settle(&balances);

        assert_eq!(balances, copy);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let balances = balances_from_pairs([
            ("A", dec!(12.34)),
            ("B", dec!(-7.01)),
            ("C", dec!(-5.33)),
            ("D", dec!(0)),
        ]);

        assert_eq!(settle(&balances), settle(&balances));
    }

    #[rstest]
    #[case::single(&[dec!(3)], (0, 0))]
    #[case::mixed(&[dec!(1), dec!(-4), dec!(7), dec!(-4), dec!(7)], (2, 1))]
    #[case::all_equal(&[dec!(0), dec!(0), dec!(0)], (0, 0))]
    fn test_extremes_first_occurrence(#[case] amounts: &[Decimal], #[case] expected: (usize, usize)) {
        assert_eq!(extremes(amounts), Some(expected));
    }

    #[test]
    fn test_algorithm_trait_delegates() {
        let balances = balances_from_pairs([("A", dec!(5)), ("B", dec!(-5))]);
        assert_eq!(MaxMinSettlement.settle(&balances), settle(&balances));
        assert_eq!(MaxMinSettlement.name(), "max-min");
    }
}
