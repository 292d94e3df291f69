//! Thread-safe ledger book for concurrent game processing
//!
//! This module provides the `AsyncLedgerBook` struct, which keeps game ledgers
//! in a `DashMap` so that records for different games can be applied from
//! several tasks at once.
//!
//! # Thread Safety
//!
//! Each game lives in its own DashMap entry. Applying a record locks only that
//! entry's shard, so games proceed in parallel while records for the same game
//! are applied one at a time.

use crate::core::traits::GameBook;
use crate::types::{GameId, GameLedger, LedgerEntry, SettlementError};
use dashmap::DashMap;

/// Concurrent store of game ledgers
#[derive(Debug, Default)]
pub struct AsyncLedgerBook {
    /// Concurrent map of game identifiers to ledgers
    games: DashMap<GameId, GameLedger>,
}

impl AsyncLedgerBook {
    /// Create an empty AsyncLedgerBook
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
        }
    }

    /// Apply a record to its game
    ///
    /// The game entry stays locked while the record is applied, so no other
    /// task can observe a half-applied record.
    pub fn record(&self, entry: &LedgerEntry) -> Result<(), SettlementError> {
        let mut game = self
            .games
            .entry(entry.game.clone())
            .or_insert_with(|| GameLedger::new(entry.game.clone()));
        game.value_mut().apply(entry)
    }

    /// Snapshot of one game
    pub fn game(&self, game: &str) -> Option<GameLedger> {
        self.games.get(game).map(|entry| entry.value().clone())
    }

    /// Number of games seen so far
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no game has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Snapshot of all games sorted by identifier
    pub fn sorted_games(&self) -> Vec<GameLedger> {
        let mut games: Vec<GameLedger> = self
            .games
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        games.sort_by(|a, b| a.game.cmp(&b.game));
        games
    }
}

impl GameBook for AsyncLedgerBook {
    fn games(&self) -> Vec<GameLedger> {
        self.sorted_games()
    }
}
