//! Poker Settlement Engine CLI
//!
//! Command-line interface for settling poker games from CSV ledgers.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv > payments.csv
//! cargo run -- --format json ledger.csv > payments.json
//! cargo run -- --algorithm largest-first ledger.csv
//! cargo run -- --report summary ledger.csv > players.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 ledger.csv
//! ```
//!
//! The program reads ledger records from the input CSV file, settles every
//! game with the selected algorithm and strategy, and writes the payments (or
//! the per-player summary) to stdout. Diagnostics go to stderr; set
//! `RUST_LOG` to change their level.
//!
//! # Processing Strategies
//!
//! - **sync**: Synchronous CSV parsing with single-threaded processing (default)
//! - **async**: Asynchronous batch processing, games settled in parallel
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use poker_settlement_engine::cli;
use poker_settlement_engine::strategy;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();

    let strategy = {
        let batch = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), args.to_settlement_config(), batch)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, args.report, args.format, &mut output) {
        log::error!("{}", e);
        process::exit(1);
    }
}
