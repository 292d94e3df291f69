//! Processing strategy module
//!
//! A strategy is a complete pipeline: read the ledger file, build the games,
//! and settle or summarize each of them. Strategies can be selected at runtime; they
//! differ in how they schedule work, never in the settlements they produce.

use crate::cli::{OutputFormat, ReportType, StrategyType};
use crate::core::SettlementConfig;
use crate::io::{write_settlements, write_summaries};
use crate::types::{GameSettlement, GameSummary, SettlementError};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete settlement pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Read a ledger file and settle every game in it
    ///
    /// # Returns
    ///
    /// * `Ok(settlements)` sorted by game identifier; games that could not be
    ///   settled are logged and left out
    /// * `Err(SettlementError)` if a fatal error occurred (file not found, I/O error)
    ///
    /// Individual record errors are logged and do not stop processing.
    fn settle(&self, input_path: &Path) -> Result<Vec<GameSettlement>, SettlementError>;

    /// Read a ledger file and summarize every player of every game
    fn summarize(&self, input_path: &Path) -> Result<Vec<GameSummary>, SettlementError>;

    /// Build the selected report for a ledger file and write it
    fn process(
        &self,
        input_path: &Path,
        report: ReportType,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<(), SettlementError> {
        match report {
            ReportType::Settlement => {
                let settlements = self.settle(input_path)?;
                write_settlements(&settlements, format, output)
            }
            ReportType::Summary => {
                let summaries = self.summarize(input_path)?;
                write_summaries(&summaries, format, output)
            }
        }
    }
}

/// Create a processing strategy
///
/// # Arguments
///
/// * `strategy_type` - Sync or Async
/// * `settlement` - Algorithm and validation settings, shared by both strategies
/// * `batch` - Optional batch configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    settlement: SettlementConfig,
    batch: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(settlement)),
        StrategyType::Async => {
            let batch = batch.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(settlement, batch))
        }
    }
}
