//! CSV format handling for ledger records and settlement output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to ledger entries
//! - Settlement and summary output serialization
//!
//! All functions are pure (no I/O beyond the writer they are given).

use crate::types::{
    EntryKind, GameSettlement, GameSummary, LedgerEntry, SettlementError, DEFAULT_GAME,
};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, game, player, amount.
/// The game column may be left out entirely for single-game ledgers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub game: Option<String>,
    pub player: String,
    pub amount: Option<String>,
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Convert a CsvRecord to a LedgerEntry
///
/// This function:
/// - Parses the record type (`buyin`, `cashout`, `net`; case insensitive,
///   `buy-in`/`cash-out` accepted)
/// - Parses the amount, which every record type requires
/// - Rejects negative buy-ins and cash-outs; net balances may be negative
/// - Fills in the default game when the game column is empty
///
/// # Errors
///
/// Returns the `SettlementError` describing why the record was rejected.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerEntry, SettlementError> {
    let kind = match csv_record.record_type.to_lowercase().as_str() {
        "buyin" | "buy-in" => EntryKind::BuyIn,
        "cashout" | "cash-out" => EntryKind::CashOut,
        "net" => EntryKind::Net,
        _ => {
            return Err(SettlementError::invalid_record_type(
                &csv_record.record_type,
                &csv_record.player,
            ))
        }
    };

    let game = match csv_record.game {
        Some(game) if !game.trim().is_empty() => game.trim().to_string(),
        _ => DEFAULT_GAME.to_string(),
    };

    let player = csv_record.player.trim().to_string();
    if player.is_empty() {
        return Err(SettlementError::empty_participant(&game));
    }

    let amount = match csv_record.amount {
        Some(raw) if !raw.trim().is_empty() => parse_amount(raw.trim())
            .ok_or_else(|| SettlementError::invalid_amount(&raw, &player))?,
        _ => return Err(SettlementError::missing_amount(kind.as_str(), &player)),
    };

    if kind != EntryKind::Net && amount.is_sign_negative() && !amount.is_zero() {
        return Err(SettlementError::invalid_amount(&amount.to_string(), &player));
    }

    Ok(LedgerEntry {
        kind,
        game,
        player,
        amount,
    })
}

/// Write settlements to CSV format
///
/// Writes one row per transfer with columns: game, from, to, amount. Games
/// appear in the order given and transfers in the order they were recorded.
/// Amounts are written with two decimal places.
///
/// Only transfers are written. A game's imbalance has no row of its own;
/// it is logged when the game is settled and carried by the JSON output.
///
/// # Errors
///
/// Returns `IoError` if the output could not be written.
pub fn write_settlements_csv(
    settlements: &[GameSettlement],
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["game", "from", "to", "amount"])
        .map_err(|e| SettlementError::io_error("Failed to write CSV header", e))?;

    for game in settlements {
        for transfer in &game.settlement.transfers {
            writer
                .write_record(&[
                    game.game.clone(),
                    transfer.from.clone(),
                    transfer.to.clone(),
                    format!("{:.2}", transfer.amount),
                ])
                .map_err(|e| SettlementError::io_error("Failed to write transfer record", e))?;
        }
    }

    writer.flush()?;

    Ok(())
}

/// Write game summaries to CSV format
///
/// One row per player with columns: game, player, buy_ins, total_buy_in,
/// cash_out, net. Individual buy-ins are joined with `;`, and `cash_out` is
/// left empty for a player who has not cashed out.
///
/// # Errors
///
/// Returns `IoError` if the output could not be written.
pub fn write_summaries_csv(
    summaries: &[GameSummary],
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["game", "player", "buy_ins", "total_buy_in", "cash_out", "net"])
        .map_err(|e| SettlementError::io_error("Failed to write CSV header", e))?;

    for game in summaries {
        for player in &game.players {
            let buy_ins: Vec<String> = player.buy_ins.iter().map(|b| format!("{:.2}", b)).collect();
            let cash_out = player
                .cash_out
                .map(|c| format!("{:.2}", c))
                .unwrap_or_default();

            writer
                .write_record(&[
                    game.game.clone(),
                    player.player.clone(),
                    buy_ins.join(";"),
                    format!("{:.2}", player.total_buy_in),
                    cash_out,
                    format!("{:.2}", player.net),
                ])
                .map_err(|e| SettlementError::io_error("Failed to write summary record", e))?;
        }
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlayerSummary, Settlement, Transfer};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn record(record_type: &str, game: Option<&str>, player: &str, amount: Option<&str>) -> CsvRecord {
        CsvRecord {
            record_type: record_type.to_string(),
            game: game.map(|s| s.to_string()),
            player: player.to_string(),
            amount: amount.map(|s| s.to_string()),
        }
    }

    #[rstest]
    #[case("buyin", EntryKind::BuyIn)]
    #[case("BUYIN", EntryKind::BuyIn)]
    #[case("buy-in", EntryKind::BuyIn)]
    #[case("cashout", EntryKind::CashOut)]
    #[case("Cash-Out", EntryKind::CashOut)]
    #[case("net", EntryKind::Net)]
    fn test_convert_record_types(#[case] record_type: &str, #[case] expected: EntryKind) {
        let entry = convert_csv_record(record(record_type, Some("g"), "Alice", Some("10"))).unwrap();
        assert_eq!(entry.kind, expected);
        assert_eq!(entry.game, "g");
        assert_eq!(entry.player, "Alice");
        assert_eq!(entry.amount, dec!(10));
    }

    #[rstest]
    #[case::missing_column(None)]
    #[case::empty(Some(""))]
    #[case::blank(Some("   "))]
    fn test_convert_defaults_game(#[case] game: Option<&str>) {
        let entry = convert_csv_record(record("buyin", game, "Alice", Some("10"))).unwrap();
        assert_eq!(entry.game, DEFAULT_GAME);
    }

    #[rstest]
    #[case("  100.50  ", dec!(100.50))]
    #[case("-20.25", dec!(-20.25))]
    #[case("1e2", dec!(100))]
    fn test_convert_amount_parsing(#[case] raw: &str, #[case] expected: Decimal) {
        let entry = convert_csv_record(record("net", None, "Bob", Some(raw))).unwrap();
        assert_eq!(entry.amount, expected);
    }

    #[rstest]
    #[case::invalid_type(record("rebuy", None, "A", Some("10")), "Invalid record type")]
    #[case::missing_amount(record("buyin", None, "A", None), "requires an amount")]
    #[case::blank_amount(record("cashout", None, "A", Some(" ")), "requires an amount")]
    #[case::invalid_amount(record("buyin", None, "A", Some("ten")), "Invalid amount")]
    #[case::nan_amount(record("net", None, "A", Some("NaN")), "Invalid amount")]
    #[case::infinite_amount(record("net", None, "A", Some("inf")), "Invalid amount")]
    #[case::negative_buy_in(record("buyin", None, "A", Some("-5")), "Invalid amount")]
    #[case::negative_cash_out(record("cashout", None, "A", Some("-0.01")), "Invalid amount")]
    #[case::empty_player(record("buyin", Some("g"), "  ", Some("5")), "cannot be empty")]
    fn test_convert_errors(#[case] csv_record: CsvRecord, #[case] expected_error: &str) {
        let result = convert_csv_record(csv_record);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(expected_error));
    }

    #[test]
    fn test_zero_cash_out_accepted() {
        let entry = convert_csv_record(record("cashout", None, "A", Some("0"))).unwrap();
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    fn game(name: &str, transfers: Vec<Transfer>) -> GameSettlement {
        GameSettlement {
            game: name.to_string(),
            settlement: Settlement::balanced(transfers),
        }
    }

    #[rstest]
    #[case::no_games(vec![], "game,from,to,amount\n")]
    #[case::settled_game_without_transfers(
        vec![game("g", vec![])],
        "game,from,to,amount\n"
    )]
    #[case::single_game(
        vec![game("friday", vec![
            Transfer::new("B", "A", dec!(30)),
            Transfer::new("C", "A", dec!(20)),
        ])],
        "game,from,to,amount\nfriday,B,A,30.00\nfriday,C,A,20.00\n"
    )]
    #[case::games_in_given_order(
        vec![
            game("b", vec![Transfer::new("X", "Y", dec!(1.5))]),
            game("a", vec![Transfer::new("P", "Q", dec!(2))]),
        ],
        "game,from,to,amount\nb,X,Y,1.50\na,P,Q,2.00\n"
    )]
    #[case::names_with_commas(
        vec![game("g", vec![Transfer::new("Smith, J", "Lee", dec!(5))])],
        "game,from,to,amount\ng,\"Smith, J\",Lee,5.00\n"
    )]
    fn test_write_settlements_csv(
        #[case] settlements: Vec<GameSettlement>,
        #[case] expected_output: &str,
    ) {
        let mut output = Vec::new();
        let result = write_settlements_csv(&settlements, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, expected_output);
    }

    #[test]
    fn test_csv_settlement_output_carries_transfers_only() {
        let settlements = vec![GameSettlement {
            game: "short".to_string(),
            settlement: Settlement {
                transfers: vec![Transfer::new("B", "A", dec!(50))],
                imbalance: dec!(-10),
            },
        }];

        let mut output = Vec::new();
        write_settlements_csv(&settlements, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "game,from,to,amount\nshort,B,A,50.00\n"
        );
    }

    #[test]
    fn test_write_summaries_csv() {
        let summaries = vec![GameSummary {
            game: "friday".to_string(),
            players: vec![
                PlayerSummary {
                    player: "Alice".to_string(),
                    buy_ins: vec![dec!(100), dec!(50.5)],
                    total_buy_in: dec!(150.5),
                    cash_out: Some(dec!(200)),
                    net: dec!(49.5),
                },
                PlayerSummary {
                    player: "Bob".to_string(),
                    buy_ins: vec![dec!(20)],
                    total_buy_in: dec!(20),
                    cash_out: None,
                    net: dec!(-20),
                },
            ],
        }];

        let mut output = Vec::new();
        write_summaries_csv(&summaries, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "game,player,buy_ins,total_buy_in,cash_out,net\n\
             friday,Alice,100.00;50.50,150.50,200.00,49.50\n\
             friday,Bob,20.00,20.00,,-20.00\n"
        );
    }
}
