//! I/O module
//!
//! Handles CSV parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `json_format` - JSON output serialization
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_settlements_csv, write_summaries_csv, CsvRecord};
pub use json_format::{write_settlements_json, write_summaries_json};
pub use sync_reader::SyncReader;

use crate::cli::OutputFormat;
use crate::types::{GameSettlement, GameSummary, SettlementError};
use std::io::Write;

/// Write settlements in the requested format
pub fn write_settlements(
    settlements: &[GameSettlement],
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    match format {
        OutputFormat::Csv => write_settlements_csv(settlements, output),
        OutputFormat::Json => write_settlements_json(settlements, output),
    }
}

/// Write game summaries in the requested format
pub fn write_summaries(
    summaries: &[GameSummary],
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    match format {
        OutputFormat::Csv => write_summaries_csv(summaries, output),
        OutputFormat::Json => write_summaries_json(summaries, output),
    }
}
