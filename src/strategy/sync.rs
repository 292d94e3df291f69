//! Synchronous processing strategy
//!
//! Reads the ledger with `SyncReader`, applies every record to a `LedgerBook`
//! and settles the games one after the other on the calling thread.

use crate::core::{GameBook, LedgerBook, SettlementConfig, SettlementCoordinator};
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{GameSettlement, GameSummary, SettlementError};
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use poker_settlement_engine::cli::{OutputFormat, ReportType};
/// use poker_settlement_engine::core::SettlementConfig;
/// use poker_settlement_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let strategy = SyncProcessingStrategy::new(SettlementConfig::default());
/// let mut output = std::io::stdout();
///
/// strategy
///     .process(
///         Path::new("ledger.csv"),
///         ReportType::Settlement,
///         OutputFormat::Csv,
///         &mut output,
///     )
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    coordinator: SettlementCoordinator,
}

impl SyncProcessingStrategy {
    /// Create a strategy that settles with the given configuration
    pub fn new(config: SettlementConfig) -> Self {
        Self {
            coordinator: SettlementCoordinator::new(&config),
        }
    }
}

impl SyncProcessingStrategy {
    /// Read every record of the ledger into a fresh book
    fn load(&self, input_path: &Path) -> Result<LedgerBook, SettlementError> {
        let mut book = LedgerBook::new();
        let reader = SyncReader::new(input_path)?;
        let mut rejected = 0usize;

        for result in reader {
            match result {
                Ok(entry) => {
                    if let Err(e) = book.record(&entry) {
                        log::warn!("Ledger record rejected: {}", e);
                        rejected += 1;
                    }
                }
                Err(e) => {
                    log::warn!("CSV parsing error: {}", e);
                    rejected += 1;
                }
            }
        }

        log::debug!(
            "Ledger read: {} games, {} records rejected",
            book.sorted_games().len(),
            rejected
        );
        Ok(book)
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn settle(&self, input_path: &Path) -> Result<Vec<GameSettlement>, SettlementError> {
        let book = self.load(input_path)?;
        Ok(self.coordinator.settle_book(&book))
    }

    fn summarize(&self, input_path: &Path) -> Result<Vec<GameSummary>, SettlementError> {
        let book = self.load(input_path)?;
        Ok(book.summaries())
    }
}
