use crate::error::GameError;
use crate::game::capture::{self, CaptureKind};
use crate::game::state::GameState;
use crate::model::card::Card;
use serde::Serialize;
use tracing::{Level, event};

/// Result of one player's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub player: usize,
    /// `None` when the turn was skipped because hand and deck were both empty.
    pub played: Option<Card>,
    pub kind: CaptureKind,
    pub captured: Vec<Card>,
    pub sweep_bonus: bool,
    pub cards_remaining_on_table: usize,
    pub redealt: bool,
}

impl TurnOutcome {
    pub fn skipped(&self) -> bool {
        self.played.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready { redealt: bool },
    Skip,
}

/// Refills an empty hand from the deck so the player has something to choose from.
pub fn prepare_turn(state: &mut GameState, player: usize) -> Result<Readiness, GameError> {
    state.ensure_player(player)?;
    if !state.players[player].hand.is_empty() {
        return Ok(Readiness::Ready { redealt: false });
    }
    if state.deck.is_empty() {
        return Ok(Readiness::Skip);
    }
    state.redeal(player)?;
    event!(
        target: "scopa_core::turn",
        Level::DEBUG,
        player,
        deck_remaining = state.deck.len(),
        "hand refilled"
    );
    Ok(Readiness::Ready { redealt: true })
}

/// Plays the card at `hand_index` for `player` and applies whatever it captures.
///
/// An empty hand is refilled first and that refill stands even if the index
/// is then refused. An out-of-range index leaves the table, turn order and
/// the (possibly refilled) hand as they are, so the same player can simply be
/// asked again.
pub fn play_turn(
    state: &mut GameState,
    player: usize,
    hand_index: usize,
) -> Result<TurnOutcome, GameError> {
    let redealt = match prepare_turn(state, player)? {
        Readiness::Ready { redealt } => redealt,
        Readiness::Skip => {
            state.advance_after(player);
            event!(target: "scopa_core::turn", Level::DEBUG, player, "turn skipped");
            return Ok(TurnOutcome {
                player,
                played: None,
                kind: CaptureKind::NoMatch,
                captured: Vec::new(),
                sweep_bonus: false,
                cards_remaining_on_table: state.table.len(),
                redealt: false,
            });
        }
    };

    let played = state.players[player].play_card(hand_index)?;
    let capture = capture::resolve(played, state.table.cards());

    let mut sweep_bonus = false;
    if capture.is_capture() {
        state.table.remove_all(&capture.cards);
        let actor = &mut state.players[player];
        actor.discard_pile.add(played);
        actor.discard_pile.extend(capture.cards.iter().copied());
        if state.table.is_empty() {
            actor.special_points += 1;
            state.round_sweeps[player] += 1;
            sweep_bonus = true;
        }
        state.last_capturer = Some(player);
    } else {
        state.table.push(played);
    }

    state.advance_after(player);
    state.check_conservation()?;

    if tracing::enabled!(Level::INFO) {
        let captured = capture
            .cards
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(",");
        event!(
            target: "scopa_core::turn",
            Level::INFO,
            player,
            played = %played,
            kind = ?capture.kind,
            captured = %captured,
            sweep = sweep_bonus,
            table = state.table.len(),
            "card played"
        );
    }

    Ok(TurnOutcome {
        player,
        played: Some(played),
        kind: capture.kind,
        captured: capture.cards,
        sweep_bonus,
        cards_remaining_on_table: state.table.len(),
        redealt,
    })
}
