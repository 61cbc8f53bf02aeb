use thiserror::Error;

/// Failures surfaced by game operations.
///
/// `InvalidHandIndex` is recoverable (ask the same player again).
/// `InsufficientCards` aborts the current round. `InvariantViolation` means
/// the engine itself is broken and must not be papered over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("needed {needed} cards from the deck but only {available} remain")]
    InsufficientCards { needed: usize, available: usize },
    #[error("hand index {index} is out of range for a hand of {hand_size} cards")]
    InvalidHandIndex { index: usize, hand_size: usize },
    #[error("card conservation broken: {0}")]
    InvariantViolation(String),
    #[error("player index {index} does not exist ({players} players seated)")]
    UnknownPlayer { index: usize, players: usize },
    #[error("at least one player is required")]
    NoPlayers,
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error("invalid rules: {0}")]
    InvalidRules(String),
    #[error("input ended before the game could continue")]
    Abandoned,
}

impl GameError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::InvalidHandIndex { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("player name must not be blank")]
    Blank,
    #[error("the name '{0}' is reserved")]
    Reserved(String),
    #[error("the name '{0}' is already taken")]
    Duplicate(String),
}
