#![deny(warnings)]
pub mod collaborators;
pub mod error;
pub mod game;
pub mod model;
pub mod rules;

pub use error::{GameError, NameError};
pub use game::controller::{GameController, RoundReport};
pub use game::round::{RoundSummary, handle_round_end, is_round_over, start_next_round};
pub use game::scoring::{Winner, calculate_final_scores, declare_winner};
pub use game::state::{GameState, Layout};
pub use game::turn::{TurnOutcome, play_turn};
pub use rules::RuleSet;

/// Seats `names` and deals the first round from a freshly shuffled deck.
pub fn initialize_game<S: AsRef<str>>(names: &[S]) -> Result<GameState, GameError> {
    GameState::new(names)
}

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "scopa"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
