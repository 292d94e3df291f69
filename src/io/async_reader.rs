//! Asynchronous CSV reader with batch interface
//!
//! Reads ledger records in batches using csv-async. Records that cannot be
//! converted are logged and skipped, so a batch only holds valid entries.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of LedgerEntry
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::LedgerEntry;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` valid ledger records
    ///
    /// Returns an empty vector once the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerEntry> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(entry) => batch.push(entry),
                    Err(e) => log::warn!("Record conversion error: {}", e),
                },
                Some(Err(e)) => log::warn!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}
