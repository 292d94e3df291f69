//! JSON output for settlements and game summaries
//!
//! Each game becomes an object shaped like the response of a settlement API:
//!
//! ```json
//! [
//!   {
//!     "game": "friday",
//!     "transactions": [{ "from": "Bob", "to": "Alice", "amount": "30.00" }],
//!     "imbalance": "0"
//!   }
//! ]
//! ```
//!
//! Decimals are written as strings so no precision is lost.

use crate::types::{GameSettlement, GameSummary, SettlementError};
use serde::Serialize;
use std::io::Write;

/// Write settlements as a pretty-printed JSON array followed by a newline
///
/// # Errors
///
/// Returns `IoError` if the output could not be written.
pub fn write_settlements_json(
    settlements: &[GameSettlement],
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    write_json(settlements, output)
}

/// Write game summaries as a pretty-printed JSON array
///
/// Each game is `{ "game", "summary": [{ "name", "buyIns", "totalBuyIn",
/// "cashOut", "net" }] }`.
pub fn write_summaries_json(
    summaries: &[GameSummary],
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    write_json(summaries, output)
}

fn write_json<T: Serialize>(items: &[T], output: &mut dyn Write) -> Result<(), SettlementError> {
    serde_json::to_writer_pretty(&mut *output, items)
        .map_err(|e| SettlementError::io_error("Failed to write JSON output", e))?;

    writeln!(output)?;
    output.flush()?;
    Ok(())
}
