//! Per-player game summaries
//!
//! The report behind `--report summary`: what every player bought in for,
//! cashed out and won or lost, without computing any transfers.

use super::balance::{GameId, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One player's line in a game summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    /// Player name
    #[serde(rename = "name")]
    pub player: ParticipantId,

    /// Buy-ins in the order they were recorded
    pub buy_ins: Vec<Decimal>,

    /// Sum of `buy_ins`
    pub total_buy_in: Decimal,

    /// Final chip count, `None` while the player is still at the table
    pub cash_out: Option<Decimal>,

    /// Signed result of the game for this player
    pub net: Decimal,
}

/// Summary of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Game identifier
    pub game: GameId,

    /// Players in ledger order
    #[serde(rename = "summary")]
    pub players: Vec<PlayerSummary>,
}
