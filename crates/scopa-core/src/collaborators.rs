//! Seams to the outside world: who the players are, which card they pick,
//! and whoever wants to watch the game unfold.

use crate::error::{GameError, NameError};
use crate::game::round::RoundSummary;
use crate::game::scoring::Winner;
use crate::game::state::GameState;
use crate::game::turn::TurnOutcome;
use crate::model::card::Card;
use crate::model::player::validate_name;
use crate::model::score::ScoreBoard;
use std::collections::VecDeque;

/// Supplies candidate player names, one request at a time.
pub trait NameSource {
    /// `None` means the source gave up (for example end of input).
    fn next_name(&mut self, seat: usize) -> Option<String>;

    /// Told why the last candidate for `seat` was refused before being asked again.
    fn rejected(&mut self, _seat: usize, _error: &NameError) {}
}

/// Asks `source` for `count` names, re-asking for a seat until it gets a valid one.
pub fn collect_names<S: NameSource + ?Sized>(
    source: &mut S,
    count: usize,
) -> Result<Vec<String>, GameError> {
    if count == 0 {
        return Err(GameError::NoPlayers);
    }
    let mut names: Vec<String> = Vec::with_capacity(count);
    for seat in 0..count {
        loop {
            let Some(candidate) = source.next_name(seat) else {
                return Err(GameError::Abandoned);
            };
            match validate_name(&candidate, &names) {
                Ok(name) => {
                    names.push(name);
                    break;
                }
                Err(err) => source.rejected(seat, &err),
            }
        }
    }
    Ok(names)
}

/// Names handed out from a fixed list.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNames {
    queue: VecDeque<String>,
    pub rejections: Vec<NameError>,
}

impl ScriptedNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: names.into_iter().map(Into::into).collect(),
            rejections: Vec::new(),
        }
    }
}

impl NameSource for ScriptedNames {
    fn next_name(&mut self, _seat: usize) -> Option<String> {
        self.queue.pop_front()
    }

    fn rejected(&mut self, _seat: usize, error: &NameError) {
        self.rejections.push(error.clone());
    }
}

/// What the acting player can see when choosing a card.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub player: usize,
    pub name: &'a str,
    pub hand: &'a [Card],
    pub table: &'a [Card],
    pub deck_remaining: usize,
}

/// Picks which hand card the acting player plays.
pub trait CardChooser {
    /// Index into `view.hand`, or `None` if the player walks away.
    fn choose(&mut self, view: &TurnView<'_>) -> Option<usize>;

    /// Told that the previous pick was refused; `choose` is called again.
    fn rejected(&mut self, _player: usize, _error: &GameError) {}
}

/// Plays a fixed sequence of hand indices, then walks away.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    picks: VecDeque<usize>,
    pub rejections: Vec<GameError>,
}

impl ScriptedChooser {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            rejections: Vec::new(),
        }
    }
}

impl CardChooser for ScriptedChooser {
    fn choose(&mut self, _view: &TurnView<'_>) -> Option<usize> {
        self.picks.pop_front()
    }

    fn rejected(&mut self, _player: usize, error: &GameError) {
        self.rejections.push(error.clone());
    }
}

/// Always plays the first card in hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCardChooser;

impl CardChooser for FirstCardChooser {
    fn choose(&mut self, _view: &TurnView<'_>) -> Option<usize> {
        Some(0)
    }
}

/// Hooks for rendering; every method defaults to doing nothing.
pub trait GameObserver {
    fn turn_played(&mut self, _state: &GameState, _outcome: &TurnOutcome) {}

    fn round_finished(&mut self, _state: &GameState, _summary: &RoundSummary, _board: &ScoreBoard) {
    }

    fn game_finished(&mut self, _state: &GameState, _winner: &Winner) {}
}

impl GameObserver for () {}

impl<T: GameObserver> GameObserver for Option<T> {
    fn turn_played(&mut self, state: &GameState, outcome: &TurnOutcome) {
        if let Some(inner) = self {
            inner.turn_played(state, outcome);
        }
    }

    fn round_finished(&mut self, state: &GameState, summary: &RoundSummary, board: &ScoreBoard) {
        if let Some(inner) = self {
            inner.round_finished(state, summary, board);
        }
    }

    fn game_finished(&mut self, state: &GameState, winner: &Winner) {
        if let Some(inner) = self {
            inner.game_finished(state, winner);
        }
    }
}

/// Both observers see every event, left first.
impl<A: GameObserver, B: GameObserver> GameObserver for (A, B) {
    fn turn_played(&mut self, state: &GameState, outcome: &TurnOutcome) {
        self.0.turn_played(state, outcome);
        self.1.turn_played(state, outcome);
    }

    fn round_finished(&mut self, state: &GameState, summary: &RoundSummary, board: &ScoreBoard) {
        self.0.round_finished(state, summary, board);
        self.1.round_finished(state, summary, board);
    }

    fn game_finished(&mut self, state: &GameState, winner: &Winner) {
        self.0.game_finished(state, winner);
        self.1.game_finished(state, winner);
    }
}
