use crate::error::GameError;
use crate::game::state::GameState;
use crate::model::card::Card;
use serde::Serialize;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    /// Seat that collected the leftover table cards, if there were any.
    pub swept_to: Option<usize>,
    pub swept_cards: Vec<Card>,
}

/// A round ends once the deck and every hand are empty.
pub fn is_round_over(state: &GameState) -> bool {
    state.deck.is_empty() && state.players.iter().all(|p| p.hand.is_empty())
}

/// Hands the cards still on the table to the last player who captured.
///
/// When nobody captured during the round the dealer takes them.
pub fn handle_round_end(state: &mut GameState) -> RoundSummary {
    let round = state.round_number;
    if state.table.is_empty() {
        return RoundSummary {
            round,
            swept_to: None,
            swept_cards: Vec::new(),
        };
    }

    let recipient = state.last_capturer.unwrap_or_else(|| state.dealer());
    let swept_cards = state.table.take_all();
    state.players[recipient]
        .discard_pile
        .extend(swept_cards.iter().copied());

    event!(
        target: "scopa_core::round",
        Level::INFO,
        round,
        recipient,
        cards = swept_cards.len(),
        fallback_to_dealer = state.last_capturer.is_none(),
        "table swept at round end"
    );

    RoundSummary {
        round,
        swept_to: Some(recipient),
        swept_cards,
    }
}

/// Gathers every card, reshuffles with the game RNG and deals a new round.
///
/// Cumulative scores and special points carry over; discard piles do not.
pub fn start_next_round(state: &mut GameState) -> Result<(), GameError> {
    for player in &mut state.players {
        player.hand.clear();
        player.discard_pile.clear();
    }
    state.table.take_all();
    state.reshuffle();

    state.round_number += 1;
    state.turn_cursor = 0;
    state.last_capturer = None;
    state.scored = None;
    state.round_sweeps.iter_mut().for_each(|s| *s = 0);

    state.deal()?;
    state.check_conservation()?;

    event!(
        target: "scopa_core::round",
        Level::INFO,
        round = state.round_number,
        deck_remaining = state.deck.len(),
        "round dealt"
    );
    Ok(())
}
