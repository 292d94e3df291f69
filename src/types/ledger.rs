//! Ledger types: buy-ins, cash-outs and the per-game player ledger
//!
//! A game ledger accumulates the records of one game and derives each
//! player's net balance (`cash_out - sum(buy_ins)`). Players are kept in the
//! order they first appear, which later decides settlement tie-breaks.

use super::balance::{GameId, NetBalance, ParticipantId};
use super::error::SettlementError;
use super::summary::{GameSummary, PlayerSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Game used when a record does not name one
pub const DEFAULT_GAME: &str = "default";

/// Kinds of ledger records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Chips bought by a player; a player may buy in several times
    BuyIn,

    /// Chips a player left the table with; a later cash-out replaces an earlier one
    CashOut,

    /// A net balance reported directly, without buy-in history
    Net,
}

impl EntryKind {
    /// Lowercase name as it appears in the CSV `type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::BuyIn => "buyin",
            EntryKind::CashOut => "cashout",
            EntryKind::Net => "net",
        }
    }
}

/// One parsed ledger record
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// What the record means
    pub kind: EntryKind,

    /// Game the record belongs to
    pub game: GameId,

    /// Player the record belongs to
    pub player: ParticipantId,

    /// Amount; never negative for buy-ins and cash-outs
    pub amount: Decimal,
}

/// Everything recorded for one player in one game
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerLedger {
    /// Player name
    pub player: ParticipantId,

    /// Buy-ins in the order they were recorded
    pub buy_ins: Vec<Decimal>,

    /// Final chip count, if the player has cashed out
    pub cash_out: Option<Decimal>,

    /// Net balance reported directly (ad hoc settlement)
    pub reported_net: Option<Decimal>,
}

impl PlayerLedger {
    /// Create an empty ledger for a player
    pub fn new(player: impl Into<ParticipantId>) -> Self {
        PlayerLedger {
            player: player.into(),
            ..Default::default()
        }
    }

    /// Sum of all buy-ins
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the sum does not fit in a `Decimal`.
    pub fn total_buy_in(&self) -> Result<Decimal, SettlementError> {
        self.buy_ins.iter().try_fold(Decimal::ZERO, |acc, amount| {
            acc.checked_add(*amount)
                .ok_or_else(|| SettlementError::arithmetic_overflow("total buy-in", &self.player))
        })
    }

    /// Buy-ins, cash-out and net for reporting
    ///
    /// A player who has not cashed out yet is reported as having lost every
    /// buy-in so far. A reported net balance is passed through as is.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the amounts do not fit in a `Decimal`.
    pub fn summary(&self) -> Result<PlayerSummary, SettlementError> {
        let total_buy_in = self.total_buy_in()?;
        let net = match self.reported_net {
            Some(net) => net,
            None => self
                .cash_out
                .unwrap_or(Decimal::ZERO)
                .checked_sub(total_buy_in)
                .ok_or_else(|| SettlementError::arithmetic_overflow("net balance", &self.player))?,
        };

        Ok(PlayerSummary {
            player: self.player.clone(),
            buy_ins: self.buy_ins.clone(),
            total_buy_in,
            cash_out: self.cash_out,
            net,
        })
    }

    /// Net balance, or `None` while the player has not cashed out
    pub fn net_balance(&self) -> Result<Option<Decimal>, SettlementError> {
        if let Some(net) = self.reported_net {
            return Ok(Some(net));
        }

        match self.cash_out {
            Some(cash_out) => {
                let total = self.total_buy_in()?;
                cash_out
                    .checked_sub(total)
                    .map(Some)
                    .ok_or_else(|| SettlementError::arithmetic_overflow("net balance", &self.player))
            }
            None => Ok(None),
        }
    }

    fn has_chip_history(&self) -> bool {
        !self.buy_ins.is_empty() || self.cash_out.is_some()
    }
}

/// Ledger of a single game
#[derive(Debug, Clone, PartialEq)]
pub struct GameLedger {
    /// Game identifier
    pub game: GameId,

    /// Players in first-appearance order
    players: Vec<PlayerLedger>,

    /// Position of each player in `players`
    index: HashMap<ParticipantId, usize>,
}

impl GameLedger {
    /// Create an empty game ledger
    pub fn new(game: impl Into<GameId>) -> Self {
        GameLedger {
            game: game.into(),
            players: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Players in first-appearance order
    pub fn players(&self) -> &[PlayerLedger] {
        &self.players
    }

    /// Look up one player's ledger
    pub fn player(&self, name: &str) -> Option<&PlayerLedger> {
        self.index.get(name).map(|&i| &self.players[i])
    }

    /// Apply one record to this game
    ///
    /// # Errors
    ///
    /// - `MixedEntries` when a reported net is combined with chip history
    /// - `DuplicateParticipant` when a player reports a second net balance
    ///
    /// A rejected record leaves the ledger unchanged.
    pub fn apply(&mut self, entry: &LedgerEntry) -> Result<(), SettlementError> {
        if let Some(&i) = self.index.get(&entry.player) {
            Self::apply_to_player(&self.game, &mut self.players[i], entry)
        } else {
            let mut player = PlayerLedger::new(entry.player.clone());
            Self::apply_to_player(&self.game, &mut player, entry)?;
            self.index.insert(entry.player.clone(), self.players.len());
            self.players.push(player);
            Ok(())
        }
    }

    fn apply_to_player(
        game: &str,
        player: &mut PlayerLedger,
        entry: &LedgerEntry,
    ) -> Result<(), SettlementError> {
        match entry.kind {
            EntryKind::BuyIn | EntryKind::CashOut if player.reported_net.is_some() => {
                Err(SettlementError::mixed_entries(game, &player.player))
            }
            EntryKind::BuyIn => {
                player.buy_ins.push(entry.amount);
                Ok(())
            }
            EntryKind::CashOut => {
                if let Some(previous) = player.cash_out.replace(entry.amount) {
                    log::debug!(
                        "Game '{}': cash-out for '{}' replaced ({} -> {})",
                        game,
                        player.player,
                        previous,
                        entry.amount
                    );
                }
                Ok(())
            }
            EntryKind::Net if player.has_chip_history() => {
                Err(SettlementError::mixed_entries(game, &player.player))
            }
            EntryKind::Net if player.reported_net.is_some() => {
                Err(SettlementError::duplicate_participant(game, &player.player))
            }
            EntryKind::Net => {
                player.reported_net = Some(entry.amount);
                Ok(())
            }
        }
    }

    /// Whether every player reported a net balance directly
    ///
    /// Ad hoc games carry no buy-in history, so their balances are checked
    /// for a zero sum before settlement.
    pub fn is_ad_hoc(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.reported_net.is_some())
    }

    /// Summary of every player in ledger order
    ///
    /// Unlike [`GameLedger::net_balances`], players who have not cashed out
    /// are included.
    pub fn summary(&self) -> Result<GameSummary, SettlementError> {
        let players = self
            .players
            .iter()
            .map(PlayerLedger::summary)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GameSummary {
            game: self.game.clone(),
            players,
        })
    }

    /// Net balances of all players in ledger order
    ///
    /// # Errors
    ///
    /// Returns `MissingCashOut` naming every player who has not cashed out,
    /// or `ArithmeticOverflow` if a player's amounts overflow.
    pub fn net_balances(&self) -> Result<Vec<NetBalance>, SettlementError> {
        let mut balances = Vec::with_capacity(self.players.len());
        let mut missing = Vec::new();

        for player in &self.players {
            match player.net_balance()? {
                Some(net) => balances.push(NetBalance::new(player.player.clone(), net)),
                None => missing.push(player.player.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(SettlementError::missing_cash_out(&self.game, missing));
        }

        Ok(balances)
    }
}
