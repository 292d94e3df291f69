//! Settlement coordinator
//!
//! Sits between the ledger and the settlement algorithms, doing what a request
//! layer does before it calls the engine:
//! - derives each game's net balances and refuses games with players who have
//!   not cashed out
//! - checks that ad hoc balances sum to zero within a tolerance
//! - runs the configured algorithm and logs a note for any residual imbalance

use crate::cli::AlgorithmType;
use crate::core::create_algorithm;
use crate::core::traits::{GameBook, SettlementAlgorithm};
use crate::types::{GameLedger, GameSettlement, NetBalance, SettlementError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Default tolerance for the zero-sum check on ad hoc balances
pub const DEFAULT_ZERO_SUM_TOLERANCE: Decimal = dec!(0.000001);

/// Settlement configuration
#[derive(Clone, Debug)]
pub struct SettlementConfig {
    /// Algorithm used to compute transfers
    pub algorithm: AlgorithmType,
    /// Largest absolute sum accepted for ad hoc balances
    pub zero_sum_tolerance: Decimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmType::MaxMin,
            zero_sum_tolerance: DEFAULT_ZERO_SUM_TOLERANCE,
        }
    }
}

impl SettlementConfig {
    /// Create a new SettlementConfig with custom values
    pub fn new(algorithm: AlgorithmType, zero_sum_tolerance: Decimal) -> Self {
        let zero_sum_tolerance = if zero_sum_tolerance.is_sign_negative() {
            log::warn!(
                "Invalid zero-sum tolerance ({}), using default ({})",
                zero_sum_tolerance,
                DEFAULT_ZERO_SUM_TOLERANCE
            );
            DEFAULT_ZERO_SUM_TOLERANCE
        } else {
            zero_sum_tolerance
        };

        Self {
            algorithm,
            zero_sum_tolerance,
        }
    }
}

/// Check that balances sum to zero within `tolerance`
///
/// # Errors
///
/// Returns `UnbalancedInput` when the sum is outside the tolerance and
/// `ArithmeticOverflow` when it cannot be computed.
pub fn ensure_balanced(
    game: &str,
    balances: &[NetBalance],
    tolerance: Decimal,
) -> Result<(), SettlementError> {
    let sum = balances.iter().try_fold(Decimal::ZERO, |acc, balance| {
        acc.checked_add(balance.amount)
            .ok_or_else(|| SettlementError::arithmetic_overflow("balance sum", &balance.participant))
    })?;

    if sum.abs() > tolerance {
        return Err(SettlementError::unbalanced_input(game, sum, tolerance));
    }

    Ok(())
}

/// Prepares games and hands their balances to a settlement algorithm
///
/// Cloning is cheap; clones share the algorithm.
#[derive(Clone)]
pub struct SettlementCoordinator {
    algorithm: Arc<dyn SettlementAlgorithm>,
    zero_sum_tolerance: Decimal,
}

impl std::fmt::Debug for SettlementCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementCoordinator")
            .field("algorithm", &self.algorithm.name())
            .field("zero_sum_tolerance", &self.zero_sum_tolerance)
            .finish()
    }
}

impl SettlementCoordinator {
    /// Create a coordinator for the given configuration
    pub fn new(config: &SettlementConfig) -> Self {
        Self {
            algorithm: Arc::from(create_algorithm(config.algorithm.clone())),
            zero_sum_tolerance: config.zero_sum_tolerance,
        }
    }

    /// Settle one game
    ///
    /// # Errors
    ///
    /// - `MissingCashOut` if a player has not cashed out
    /// - `UnbalancedInput` if an ad hoc game does not sum to zero
    /// - `ArithmeticOverflow` if the game's amounts overflow
    pub fn settle_game(&self, game: &GameLedger) -> Result<GameSettlement, SettlementError> {
        let balances = game.net_balances()?;

        if game.is_ad_hoc() {
            ensure_balanced(&game.game, &balances, self.zero_sum_tolerance)?;
        }

        let settlement = self.algorithm.settle(&balances);

        log::debug!(
            "Game '{}': {} players settled with {} transfers ({})",
            game.game,
            balances.len(),
            settlement.transfers.len(),
            self.algorithm.name()
        );

        if let Some(note) = settlement.imbalance_note() {
            log::warn!("Game '{}': {}", game.game, note);
        }

        Ok(GameSettlement {
            game: game.game.clone(),
            settlement,
        })
    }

    /// Settle every game in a book, in game identifier order
    pub fn settle_book<B: GameBook + ?Sized>(&self, book: &B) -> Vec<GameSettlement> {
        self.settle_all(&book.games())
    }

    /// Settle every game, logging and skipping those that cannot be settled
    pub fn settle_all<'a, I>(&self, games: I) -> Vec<GameSettlement>
    where
        I: IntoIterator<Item = &'a GameLedger>,
    {
        games
            .into_iter()
            .filter_map(|game| match self.settle_game(game) {
                Ok(settlement) => Some(settlement),
                Err(e) => {
                    log::error!("Settlement error: {}", e);
                    None
                }
            })
            .collect()
    }
}
