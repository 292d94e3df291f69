//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! ```no_run
//! use poker_settlement_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(entry) => println!("{} {} {}", entry.player, entry.kind.as_str(), entry.amount),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (`FileNotFound`, `IoError`) are returned from `new()`
//! - Individual record errors are yielded as `ParseError` with line numbers

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerEntry, SettlementError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a ledger file for streaming iteration
    ///
    /// The CSV reader trims whitespace from all fields and allows flexible
    /// field counts, so the optional game column may be left out.
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(FileNotFound | IoError)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, SettlementError> {
        let file = File::open(path).map_err(|e| SettlementError::open_failed(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerEntry, SettlementError>;

    /// Get the next ledger record, with the line number attached to any error
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;

        // Line numbers are 1-based and count the header.
        let line = self.line_num + 1;
        Some(match next {
            Ok(csv_record) => convert_csv_record(csv_record).map_err(|e| e.at_line(line)),
            Err(e) => Err(SettlementError::from(e).at_line(line)),
        })
    }
}
