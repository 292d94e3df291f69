//! Batch processing with game-based partitioning
//!
//! This module provides the `GameProcessor` struct, which applies batches of
//! ledger records concurrently and later settles all games concurrently.
//!
//! # Design
//!
//! A batch is partitioned by game. Each game's records are applied in their
//! original order on one task, so a game's player order (and therefore its
//! settlement tie-breaks) is the same as with the synchronous strategy.
//! Different games run on different tasks.
//!
//! # Architecture
//!
//! ```text
//! GameProcessor
//!     ├── Arc<AsyncLedgerBook>       (shared game ledgers)
//!     └── SettlementCoordinator      (validation + algorithm)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncLedgerBook;
use crate::core::coordinator::SettlementCoordinator;
use crate::core::traits::GameBook;
use crate::types::{GameId, GameSettlement, GameSummary, LedgerEntry, SettlementError};

/// Result of applying a single record
#[derive(Debug, Clone)]
pub struct RecordResult {
    /// The record that was applied
    pub entry: LedgerEntry,

    /// The outcome
    pub result: Result<(), SettlementError>,
}

/// Batch processor with game-based partitioning
#[derive(Debug, Clone)]
pub struct GameProcessor {
    book: Arc<AsyncLedgerBook>,
    coordinator: SettlementCoordinator,
}

impl GameProcessor {
    /// Create a new GameProcessor
    ///
    /// # Arguments
    ///
    /// * `book` - Shared ledger book the records are applied to
    /// * `coordinator` - Settles each game once all records are in
    pub fn new(book: Arc<AsyncLedgerBook>, coordinator: SettlementCoordinator) -> Self {
        Self { book, coordinator }
    }

    /// Partition a batch by game, keeping each game's records in order
    pub fn partition_by_game(&self, batch: Vec<LedgerEntry>) -> HashMap<GameId, Vec<LedgerEntry>> {
        let mut game_batches: HashMap<GameId, Vec<LedgerEntry>> = HashMap::new();

        for entry in batch {
            game_batches.entry(entry.game.clone()).or_default().push(entry);
        }

        game_batches
    }

    /// Apply one game's records sequentially
    pub async fn process_game_entries(&self, entries: Vec<LedgerEntry>) -> Vec<RecordResult> {
        let mut results = Vec::with_capacity(entries.len());

        for entry in entries {
            let result = self.book.record(&entry);
            results.push(RecordResult { entry, result });
        }

        results
    }

    /// Apply a batch, one task per game
    ///
    /// Results for the same game keep their order; results for different
    /// games may interleave in any order.
    pub async fn process_batch(&self, batch: Vec<LedgerEntry>) -> Vec<RecordResult> {
        let game_batches = self.partition_by_game(batch);

        let mut tasks = Vec::new();
        for (_game, entries) in game_batches {
            let processor = self.clone();
            let task =
                tokio::spawn(async move { processor.process_game_entries(entries).await });
            tasks.push(task);
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(game_results) => results.extend(game_results),
                Err(e) => {
                    log::error!("Task panicked: {:?}", e);
                }
            }
        }

        results
    }

    /// Per-player summaries of every game in the book
    pub fn summaries(&self) -> Vec<GameSummary> {
        self.book.summaries()
    }

    /// Settle every game in the book, one task per game
    ///
    /// Games that cannot be settled are logged and left out. The result is
    /// sorted by game identifier.
    pub async fn settle_all(&self) -> Vec<GameSettlement> {
        let mut tasks = Vec::new();
        for game in self.book.games() {
            let coordinator = self.coordinator.clone();
            tasks.push(tokio::spawn(async move { coordinator.settle_game(&game) }));
        }

        let mut settlements = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(Ok(settlement)) => settlements.push(settlement),
                Ok(Err(e)) => log::error!("Settlement error: {}", e),
                Err(e) => log::error!("Task panicked: {:?}", e),
            }
        }

        settlements.sort_by(|a, b| a.game.cmp(&b.game));
        settlements
    }
}
