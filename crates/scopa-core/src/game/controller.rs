use crate::collaborators::{CardChooser, GameObserver, TurnView};
use crate::error::GameError;
use crate::game::round::{self, RoundSummary};
use crate::game::scoring::{self, Winner};
use crate::game::state::GameState;
use crate::game::turn::{self, Readiness, TurnOutcome};
use crate::model::score::ScoreBoard;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub summary: RoundSummary,
    pub board: ScoreBoard,
}

/// Runs whole games: turns until the round ends, rounds until someone wins.
pub struct GameController<C, O> {
    state: GameState,
    chooser: C,
    observer: O,
}

impl<C: CardChooser, O: GameObserver> GameController<C, O> {
    pub fn new(state: GameState, chooser: C, observer: O) -> Self {
        Self {
            state,
            chooser,
            observer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn chooser(&self) -> &C {
        &self.chooser
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn into_parts(self) -> (GameState, O) {
        (self.state, self.observer)
    }

    /// Plays one turn for whoever is up, asking again after an invalid pick.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, GameError> {
        let player = self.state.current_player();
        let redealt = match turn::prepare_turn(&mut self.state, player)? {
            Readiness::Ready { redealt } => redealt,
            Readiness::Skip => {
                let outcome = turn::play_turn(&mut self.state, player, 0)?;
                self.observer.turn_played(&self.state, &outcome);
                return Ok(outcome);
            }
        };

        loop {
            let choice = {
                let seat = &self.state.players()[player];
                let view = TurnView {
                    player,
                    name: seat.name(),
                    hand: seat.hand.cards(),
                    table: self.state.table(),
                    deck_remaining: self.state.deck().len(),
                };
                self.chooser.choose(&view)
            };
            let Some(hand_index) = choice else {
                return Err(GameError::Abandoned);
            };

            match turn::play_turn(&mut self.state, player, hand_index) {
                Ok(mut outcome) => {
                    outcome.redealt |= redealt;
                    self.observer.turn_played(&self.state, &outcome);
                    return Ok(outcome);
                }
                Err(err) if err.is_recoverable() => {
                    event!(
                        target: "scopa_core::turn",
                        Level::DEBUG,
                        player,
                        hand_index,
                        error = %err,
                        "selection refused"
                    );
                    self.chooser.rejected(player, &err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Plays turns until the round is over, then sweeps and scores it.
    pub fn play_round(&mut self) -> Result<RoundReport, GameError> {
        while !round::is_round_over(&self.state) {
            self.play_turn()?;
        }
        let summary = round::handle_round_end(&mut self.state);
        let board = scoring::calculate_final_scores(&mut self.state);
        self.state.check_conservation()?;
        self.observer
            .round_finished(&self.state, &summary, &board);
        Ok(RoundReport { summary, board })
    }

    /// Plays rounds until the game is decided or the round cap is reached.
    pub fn run(&mut self) -> Result<Winner, GameError> {
        loop {
            self.play_round()?;
            if self.state.is_game_over() {
                break;
            }
            if self.state.round_number() >= self.state.rules().max_rounds {
                event!(
                    target: "scopa_core::round",
                    Level::WARN,
                    rounds = self.state.round_number(),
                    "round cap reached without a clear leader"
                );
                break;
            }
            round::start_next_round(&mut self.state)?;
        }

        let winner = scoring::declare_winner(&self.state);
        self.observer.game_finished(&self.state, &winner);
        Ok(winner)
    }
}
