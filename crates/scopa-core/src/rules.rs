use crate::error::GameError;
use crate::model::deck::DECK_SIZE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINNING_SCORE: u32 = 8;
pub const DEFAULT_HAND_SIZE: usize = 3;
pub const DEFAULT_TABLE_SIZE: usize = 4;
pub const DEFAULT_MAX_ROUNDS: u32 = 200;

/// Tunable parameters of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub winning_score: u32,
    pub hand_size: usize,
    pub table_size: usize,
    /// Adds each player's sweeps from the round to their score when it is tallied.
    pub sweeps_score: bool,
    /// Hard stop for the round loop; the winner is then picked by tie-break.
    pub max_rounds: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            winning_score: DEFAULT_WINNING_SCORE,
            hand_size: DEFAULT_HAND_SIZE,
            table_size: DEFAULT_TABLE_SIZE,
            sweeps_score: false,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl RuleSet {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.winning_score == 0 {
            return Err(GameError::InvalidRules(
                "winning score must be greater than zero".to_string(),
            ));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidRules(
                "hand size must be at least one card".to_string(),
            ));
        }
        if self.hand_size + self.table_size > DECK_SIZE {
            return Err(GameError::InvalidRules(format!(
                "a deal of {} + {} cards cannot come from a {DECK_SIZE}-card deck",
                self.hand_size, self.table_size
            )));
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidRules(
                "max rounds must be at least one".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks the rules against a table of `players`: the opening deal must
    /// fit in the deck and what is left must split into whole hands.
    pub fn validate_for(&self, players: usize) -> Result<(), GameError> {
        self.validate()?;
        let opening = self.opening_deal_size(players);
        if opening > DECK_SIZE {
            return Err(GameError::InvalidRules(format!(
                "{players} players need {opening} cards for the opening deal but the deck has {DECK_SIZE}"
            )));
        }
        let remaining = DECK_SIZE - opening;
        if remaining % self.hand_size != 0 {
            return Err(GameError::InvalidRules(format!(
                "{remaining} cards left after the opening deal do not split into hands of {}",
                self.hand_size
            )));
        }
        Ok(())
    }

    /// Cards consumed by the opening deal for `players` seats.
    pub fn opening_deal_size(&self, players: usize) -> usize {
        self.hand_size * players + self.table_size
    }
}
