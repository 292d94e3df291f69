//! Core traits for settlement algorithms and ledger books
//!
//! These abstractions let the processing strategies swap the settlement
//! algorithm at runtime and treat the synchronous and concurrent ledger
//! books alike.

use crate::types::{GameLedger, GameSummary, NetBalance, Settlement};

/// A debt settlement algorithm
///
/// Implementations are pure: they copy the balances they are given, never
/// mutate the caller's slice, and return the same settlement for the same
/// input. They never fail; whatever cannot be settled is reported as the
/// settlement's imbalance.
pub trait SettlementAlgorithm: Send + Sync {
    /// Compute the transfers that bring every balance to zero
    fn settle(&self, balances: &[NetBalance]) -> Settlement;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Read access to a store of game ledgers
///
/// Implementations can be synchronous (using HashMap) or concurrent (using
/// DashMap). Recording stays on the implementations: the HashMap book needs
/// `&mut self`, the DashMap book only `&self`.
pub trait GameBook {
    /// Snapshot of all games, sorted by game identifier
    fn games(&self) -> Vec<GameLedger>;

    /// Per-player summaries of every game, sorted by game identifier
    ///
    /// Games whose amounts overflow are logged and left out.
    fn summaries(&self) -> Vec<GameSummary> {
        self.games()
            .iter()
            .filter_map(|game| match game.summary() {
                Ok(summary) => Some(summary),
                Err(e) => {
                    log::error!("Summary error: {}", e);
                    None
                }
            })
            .collect()
    }
}
