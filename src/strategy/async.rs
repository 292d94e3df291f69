//! Asynchronous batch processing strategy
//!
//! Processes ledger files that hold many games by spreading the games over a
//! tokio multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── GameProcessor (game partitioning + settlement tasks)
//!         ├── AsyncLedgerBook (thread-safe game ledgers)
//!         └── SettlementCoordinator (validation + algorithm)
//! ```
//!
//! Batches are applied one after another so that a game spanning several
//! batches sees its records in file order. Within a batch, games are applied
//! in parallel. Once the file is exhausted, every game is settled on its own
//! task.

use crate::core::r#async::{AsyncLedgerBook, GameProcessor, RecordResult};
use crate::core::{SettlementConfig, SettlementCoordinator};
use crate::io::async_reader::AsyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{GameSettlement, GameSummary, SettlementError};
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of records per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            log::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            log::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    coordinator: SettlementCoordinator,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(settlement: SettlementConfig, config: BatchConfig) -> Self {
        Self {
            coordinator: SettlementCoordinator::new(&settlement),
            config,
        }
    }
}

impl AsyncProcessingStrategy {
    fn runtime(&self) -> Result<tokio::runtime::Runtime, SettlementError> {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| SettlementError::io_error("Failed to create tokio runtime", e))
    }

    /// Read the ledger batch by batch into a fresh book
    async fn load(&self, input_path: &Path) -> Result<GameProcessor, SettlementError> {
        let book = Arc::new(AsyncLedgerBook::new());
        let processor = GameProcessor::new(Arc::clone(&book), self.coordinator.clone());

        let file = tokio::fs::File::open(input_path)
            .await
            .map_err(|e| SettlementError::open_failed(input_path, e))?;

        // csv-async reads futures::io::AsyncRead, tokio files need the compat layer
        let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
        let mut reader = AsyncReader::new(compat_file);
        let mut rejected = 0usize;

        loop {
            let batch = reader.read_batch(self.config.batch_size).await;
            if batch.is_empty() {
                break;
            }

            rejected += log_rejected(&processor.process_batch(batch).await);
        }

        log::debug!(
            "Ledger read: {} games, {} records rejected",
            book.len(),
            rejected
        );
        Ok(processor)
    }
}

/// Log every rejected record and return how many there were
fn log_rejected(results: &[RecordResult]) -> usize {
    let mut rejected = 0;
    for record in results {
        if let Err(e) = &record.result {
            log::warn!(
                "Ledger record rejected (game '{}', player '{}'): {}",
                record.entry.game,
                record.entry.player,
                e
            );
            rejected += 1;
        }
    }
    rejected
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn settle(&self, input_path: &Path) -> Result<Vec<GameSettlement>, SettlementError> {
        self.runtime()?.block_on(async {
            let processor = self.load(input_path).await?;
            Ok(processor.settle_all().await)
        })
    }

    fn summarize(&self, input_path: &Path) -> Result<Vec<GameSummary>, SettlementError> {
        self.runtime()?.block_on(async {
            let processor = self.load(input_path).await?;
            Ok(processor.summaries())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SyncProcessingStrategy;
    use crate::types::{EntryKind, LedgerEntry};
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy =
            AsyncProcessingStrategy::new(SettlementConfig::default(), BatchConfig::default());

        let result = strategy.settle(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(SettlementError::FileNotFound { .. })));
    }

    #[test]
    fn test_log_rejected_counts_failures() {
        let entry = LedgerEntry {
            kind: EntryKind::Net,
            game: "g".to_string(),
            player: "A".to_string(),
            amount: dec!(5),
        };
        let results = vec![
            RecordResult {
                entry: entry.clone(),
                result: Ok(()),
            },
            RecordResult {
                entry: entry.clone(),
                result: Err(SettlementError::duplicate_participant("g", "A")),
            },
        ];

        assert_eq!(log_rejected(&results), 1);
        assert_eq!(log_rejected(&[]), 0);
    }

    #[test]
    fn test_async_summary_matches_sync() {
        let file = create_temp_csv(
            "type,game,player,amount\n\
             buyin,b,Zed,10\n\
             buyin,a,Amy,5\n\
             buyin,b,Zed,15\n\
             net,c,X,3\n\
             cashout,b,Zed,40\n\
             buyin,a,Bo,5\n\
             net,c,X,4\n\
             cashout,a,Amy,10\n",
        );

        let async_strategy =
            AsyncProcessingStrategy::new(SettlementConfig::default(), BatchConfig::new(2, 2));
        let sync_strategy = SyncProcessingStrategy::new(SettlementConfig::default());

        let async_result = async_strategy.summarize(file.path()).unwrap();
        let sync_result = sync_strategy.summarize(file.path()).unwrap();

        let games: Vec<_> = async_result.iter().map(|g| g.game.as_str()).collect();
        assert_eq!(games, vec!["a", "b", "c"]);
        assert_eq!(async_result[1].players[0].buy_ins, vec![dec!(10), dec!(15)]);
        assert_eq!(async_result, sync_result);
    }

    #[test]
    fn test_async_strategy_matches_sync_across_batches() {
        // Small batches split every game across several reads.
        let csv_content = "type,game,player,amount\n\
                           buyin,mon,Zed,100\n\
                           buyin,tue,Amy,40\n\
                           buyin,mon,Bea,100\n\
                           buyin,mon,Cal,100\n\
                           net,wed,X,25\n\
                           cashout,mon,Zed,160\n\
                           buyin,tue,Ben,40\n\
                           cashout,mon,Bea,70\n\
                           net,wed,Y,-25\n\
                           cashout,mon,Cal,70\n\
                           cashout,tue,Amy,0\n\
                           cashout,tue,Ben,80\n";
        let file = create_temp_csv(csv_content);

        let async_strategy =
            AsyncProcessingStrategy::new(SettlementConfig::default(), BatchConfig::new(2, 4));
        let sync_strategy = SyncProcessingStrategy::new(SettlementConfig::default());

        let async_result = async_strategy.settle(file.path()).unwrap();
        let sync_result = sync_strategy.settle(file.path()).unwrap();

        let games: Vec<_> = async_result.iter().map(|g| g.game.as_str()).collect();
        assert_eq!(games, vec!["mon", "tue", "wed"]);
        assert_eq!(async_result, sync_result);
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_concurrent_batches, num_cpus::get());
    }
}
