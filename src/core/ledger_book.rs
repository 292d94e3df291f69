//! Ledger book module
//!
//! This module provides the `LedgerBook` struct which keeps one
//! [`GameLedger`] per game and routes incoming records to it.
//!
//! The LedgerBook is responsible for:
//! - Creating a game on its first record
//! - Rejecting records that would corrupt a game (mixed or duplicate entries)
//! - Providing games sorted by identifier for output

use crate::core::traits::GameBook;
use crate::types::{GameId, GameLedger, LedgerEntry, SettlementError};
use std::collections::HashMap;

/// Single-threaded store of game ledgers
#[derive(Debug, Default)]
pub struct LedgerBook {
    /// Map of game identifiers to ledgers
    games: HashMap<GameId, GameLedger>,
}

impl LedgerBook {
    /// Create an empty LedgerBook
    pub fn new() -> Self {
        LedgerBook {
            games: HashMap::new(),
        }
    }

    /// Apply a record to its game
    ///
    /// # Errors
    ///
    /// Propagates the game's rejection of the record. The game is still
    /// created, so a game whose only records were rejected shows up empty.
    pub fn record(&mut self, entry: &LedgerEntry) -> Result<(), SettlementError> {
        self.games
            .entry(entry.game.clone())
            .or_insert_with(|| GameLedger::new(entry.game.clone()))
            .apply(entry)
    }

    /// Look up one game
    pub fn game(&self, game: &str) -> Option<&GameLedger> {
        self.games.get(game)
    }

    /// All games sorted by identifier
    pub fn sorted_games(&self) -> Vec<&GameLedger> {
        let mut games: Vec<&GameLedger> = self.games.values().collect();
        games.sort_by(|a, b| a.game.cmp(&b.game));
        games
    }
}

impl GameBook for LedgerBook {
    fn games(&self) -> Vec<GameLedger> {
        self.sorted_games().into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryKind, NetBalance};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn entry(kind: EntryKind, game: &str, player: &str, amount: Decimal) -> LedgerEntry {
        LedgerEntry {
            kind,
            game: game.to_string(),
            player: player.to_string(),
            amount,
        }
    }

    #[test]
    fn test_records_are_routed_by_game() {
        let mut book = LedgerBook::new();
        book.record(&entry(EntryKind::BuyIn, "tuesday", "Alice", dec!(50)))
            .unwrap();
        book.record(&entry(EntryKind::BuyIn, "friday", "Alice", dec!(80)))
            .unwrap();
        book.record(&entry(EntryKind::CashOut, "tuesday", "Alice", dec!(20)))
            .unwrap();

        let tuesday = book.game("tuesday").unwrap();
        assert_eq!(
            tuesday.player("Alice").unwrap().net_balance().unwrap(),
            Some(dec!(-30))
        );

        let friday = book.game("friday").unwrap();
        assert_eq!(friday.player("Alice").unwrap().cash_out, None);
    }

    #[test]
    fn test_games_sorted_by_identifier() {
        let mut book = LedgerBook::new();
        for game in ["wed", "mon", "tue"] {
            book.record(&entry(EntryKind::Net, game, "A", dec!(0)))
                .unwrap();
        }

        let names: Vec<_> = GameBook::games(&book).into_iter().map(|g| g.game).collect();
        assert_eq!(names, vec!["mon", "tue", "wed"]);
    }

    #[test]
    fn test_summaries_skip_overflowing_games() {
        let mut book = LedgerBook::new();
        book.record(&entry(EntryKind::BuyIn, "huge", "A", Decimal::MAX))
            .unwrap();
        book.record(&entry(EntryKind::BuyIn, "huge", "A", Decimal::MAX))
            .unwrap();
        book.record(&entry(EntryKind::BuyIn, "small", "B", dec!(20)))
            .unwrap();

        let summaries = book.summaries();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].game, "small");
        assert_eq!(summaries[0].players[0].net, dec!(-20));
    }

    #[test]
    fn test_rejected_record_reported() {
        let mut book = LedgerBook::new();
        book.record(&entry(EntryKind::Net, "adhoc", "A", dec!(10)))
            .unwrap();

        let result = book.record(&entry(EntryKind::BuyIn, "adhoc", "A", dec!(10)));
        assert!(matches!(result, Err(SettlementError::MixedEntries { .. })));

        let balances = book.game("adhoc").unwrap().net_balances().unwrap();
        assert_eq!(balances, vec![NetBalance::new("A", dec!(10))]);
    }

    #[test]
    fn test_empty_book() {
        let book = LedgerBook::new();
        assert!(book.sorted_games().is_empty());
    }
}
