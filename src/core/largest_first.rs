//! Largest-first settlement
//!
//! Splits the table into a debtor queue and a creditor queue, both ordered by
//! descending magnitude, and always matches the two heads. Whoever reaches
//! zero leaves their queue and both queues are re-sorted. Sorting is stable,
//! so equal amounts keep input order.
//!
//! This stays within the same `N - 1` bound as [`MaxMinSettlement`], but the
//! pairing is not guaranteed to match it transfer for transfer.
//!
//! [`MaxMinSettlement`]: crate::core::engine::MaxMinSettlement

use crate::core::engine::{residual, SETTLEMENT_EPSILON};
use crate::core::traits::SettlementAlgorithm;
use crate::types::{NetBalance, Settlement, Transfer};
use rust_decimal::Decimal;

/// One side of the table: a participant index and the magnitude still open
#[derive(Debug, Clone, Copy)]
struct Open {
    index: usize,
    remaining: Decimal,
}

fn sort_desc(queue: &mut [Open]) {
    queue.sort_by(|a, b| b.remaining.cmp(&a.remaining));
}

/// Largest-first bucket settlement
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestFirstSettlement;

impl SettlementAlgorithm for LargestFirstSettlement {
    fn settle(&self, balances: &[NetBalance]) -> Settlement {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();

        for (index, balance) in balances.iter().enumerate() {
            if balance.amount < -SETTLEMENT_EPSILON {
                debtors.push(Open {
                    index,
                    remaining: -balance.amount,
                });
            } else if balance.amount > SETTLEMENT_EPSILON {
                creditors.push(Open {
                    index,
                    remaining: balance.amount,
                });
            }
        }

        sort_desc(&mut debtors);
        sort_desc(&mut creditors);

        let mut transfers = Vec::new();

        while let (Some(debtor), Some(creditor)) = (debtors.first_mut(), creditors.first_mut()) {
            let amount = debtor.remaining.min(creditor.remaining);
            debtor.remaining -= amount;
            creditor.remaining -= amount;

            transfers.push(Transfer::new(
                balances[debtor.index].participant.clone(),
                balances[creditor.index].participant.clone(),
                amount,
            ));

            if debtors[0].remaining <= SETTLEMENT_EPSILON {
                debtors.remove(0);
            }
            if creditors[0].remaining <= SETTLEMENT_EPSILON {
                creditors.remove(0);
            }

            sort_desc(&mut debtors);
            sort_desc(&mut creditors);
        }

        let owed = creditors.iter().map(|c| c.remaining);
        let owing = debtors.iter().map(|d| -d.remaining);

        Settlement {
            transfers,
            imbalance: residual(owed.chain(owing)),
        }
    }

    fn name(&self) -> &'static str {
        "largest-first"
    }
}
