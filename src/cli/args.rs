use crate::core::coordinator::{SettlementConfig, DEFAULT_ZERO_SUM_TOLERANCE};
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Settle poker games from a buy-in/cash-out ledger
#[derive(Parser, Debug)]
#[command(name = "poker-settle")]
#[command(about = "Compute minimal peer-to-peer payments that settle poker games", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file (type,game,player,amount)")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for a single thread or 'async' to process games in parallel"
    )]
    pub strategy: StrategyType,

    /// Settlement algorithm
    #[arg(
        long = "algorithm",
        value_name = "ALGORITHM",
        default_value = "max-min",
        help = "Settlement algorithm: 'max-min' or 'largest-first'"
    )]
    pub algorithm: AlgorithmType,

    /// Report to produce
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "settlement",
        help = "Report: 'settlement' for the payments or 'summary' for each player's buy-ins, cash-out and net"
    )]
    pub report: ReportType,

    /// Output format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "csv",
        help = "Output format: 'csv' or 'json' (only json carries each game's imbalance)"
    )]
    pub format: OutputFormat,

    /// Zero-sum tolerance for ad hoc net balances
    #[arg(
        long = "tolerance",
        value_name = "AMOUNT",
        help = "Largest accepted |sum| of ad hoc net balances (default: 0.000001)"
    )]
    pub tolerance: Option<Decimal>,

    /// Number of records per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of records per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads settling games concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available settlement algorithms
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmType {
    /// Match the largest creditor with the largest debtor on every step
    MaxMin,
    /// Match the heads of magnitude-sorted debtor and creditor queues
    LargestFirst,
}

/// Available reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportType {
    /// Transfers that settle every game
    Settlement,
    /// Buy-ins, cash-out and net of every player
    Summary,
}

/// Available output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments, falling back to defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create a SettlementConfig from CLI arguments
    pub fn to_settlement_config(&self) -> SettlementConfig {
        SettlementConfig::new(
            self.algorithm.clone(),
            self.tolerance.unwrap_or(DEFAULT_ZERO_SUM_TOLERANCE),
        )
    }
}
