use crate::error::GameError;
use crate::game::scoring::ScoredRound;
use crate::model::card::Card;
use crate::model::deck::{DECK_SIZE, Deck};
use crate::model::player::{Player, validate_name};
use crate::model::table::TableCards;
use crate::rules::RuleSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Everything a game needs, owned in one place and lent to each operation.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) rules: RuleSet,
    pub(crate) players: Vec<Player>,
    pub(crate) turn_order: Vec<usize>,
    pub(crate) turn_cursor: usize,
    pub(crate) deck: Deck,
    pub(crate) table: TableCards,
    pub(crate) last_capturer: Option<usize>,
    pub(crate) round_sweeps: Vec<u32>,
    pub(crate) round_number: u32,
    pub(crate) scored: Option<ScoredRound>,
    pub(crate) game_over: bool,
    rng: StdRng,
    seed: u64,
}

/// Hand-placed cards for building a state mid-round.
///
/// Cards not mentioned anywhere go to the deck in standard order unless
/// `deck` is given, in which case every card must be placed explicitly.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub names: Vec<String>,
    pub hands: Vec<Vec<Card>>,
    pub discards: Vec<Vec<Card>>,
    pub table: Vec<Card>,
    pub deck: Option<Vec<Card>>,
    pub scores: Vec<u32>,
}

impl GameState {
    /// Seats `names` with a seed drawn from the thread RNG.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, GameError> {
        let seed: u64 = rand::random();
        Self::with_rules(names, RuleSet::default(), seed)
    }

    pub fn with_seed<S: AsRef<str>>(names: &[S], seed: u64) -> Result<Self, GameError> {
        Self::with_rules(names, RuleSet::default(), seed)
    }

    /// Validates names, draws a turn order, shuffles and deals the first round.
    pub fn with_rules<S: AsRef<str>>(
        names: &[S],
        rules: RuleSet,
        seed: u64,
    ) -> Result<Self, GameError> {
        let players = seat_players(names)?;
        rules.validate_for(players.len())?;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut turn_order: Vec<usize> = (0..players.len()).collect();
        turn_order.shuffle(&mut rng);
        let deck = Deck::shuffled(&mut rng);

        let mut state = Self {
            rules,
            round_sweeps: vec![0; players.len()],
            players,
            turn_order,
            turn_cursor: 0,
            deck,
            table: Default::default(),
            last_capturer: None,
            round_number: 1,
            scored: None,
            game_over: false,
            rng,
            seed,
        };
        state.deal()?;
        state.check_conservation()?;
        Ok(state)
    }

    /// Builds a state from an explicit card layout. Turn order is seat order.
    pub fn from_layout(layout: Layout, rules: RuleSet) -> Result<Self, GameError> {
        rules.validate()?;
        let mut players = seat_players(&layout.names)?;
        let seat_count = players.len();

        for (seat, cards) in layout.hands.into_iter().enumerate() {
            player_slot(&mut players, seat)?.hand.extend(cards);
        }
        for (seat, cards) in layout.discards.into_iter().enumerate() {
            player_slot(&mut players, seat)?.discard_pile.extend(cards);
        }
        for (seat, score) in layout.scores.into_iter().enumerate() {
            player_slot(&mut players, seat)?.score = score;
        }

        let deck = match layout.deck {
            Some(cards) => Deck::from_cards(cards),
            None => {
                let placed: Vec<Card> = players
                    .iter()
                    .flat_map(|p| p.hand.iter().chain(p.discard_pile.cards()))
                    .chain(layout.table.iter())
                    .copied()
                    .collect();
                let rest = Deck::standard()
                    .cards()
                    .iter()
                    .copied()
                    .filter(|card| !placed.contains(card))
                    .collect();
                Deck::from_cards(rest)
            }
        };

        let state = Self {
            rules,
            players,
            turn_order: (0..seat_count).collect(),
            turn_cursor: 0,
            deck,
            table: TableCards::with_cards(layout.table),
            last_capturer: None,
            round_sweeps: vec![0; seat_count],
            round_number: 1,
            scored: None,
            game_over: false,
            rng: StdRng::seed_from_u64(0),
            seed: 0,
        };
        state.check_conservation()?;
        Ok(state)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Result<&Player, GameError> {
        self.players.get(index).ok_or(GameError::UnknownPlayer {
            index,
            players: self.players.len(),
        })
    }

    pub fn turn_order(&self) -> &[usize] {
        &self.turn_order
    }

    /// Seat expected to act next.
    pub fn current_player(&self) -> usize {
        self.turn_order[self.turn_cursor]
    }

    /// Last seat in turn order.
    pub fn dealer(&self) -> usize {
        self.turn_order[self.turn_order.len() - 1]
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn table(&self) -> &[Card] {
        self.table.cards()
    }

    pub fn last_capturer(&self) -> Option<usize> {
        self.last_capturer
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round_sweeps(&self) -> &[u32] {
        &self.round_sweeps
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.score).collect()
    }

    pub(crate) fn ensure_player(&self, index: usize) -> Result<(), GameError> {
        self.player(index).map(|_| ())
    }

    /// Moves the turn to whoever follows `player` in turn order.
    pub(crate) fn advance_after(&mut self, player: usize) {
        if let Some(pos) = self.turn_order.iter().position(|&p| p == player) {
            self.turn_cursor = (pos + 1) % self.turn_order.len();
        }
    }

    /// Opening deal: a hand to each seat in turn order, then the table.
    pub(crate) fn deal(&mut self) -> Result<(), GameError> {
        let needed = self.rules.opening_deal_size(self.players.len());
        if self.deck.len() < needed {
            return Err(GameError::InsufficientCards {
                needed,
                available: self.deck.len(),
            });
        }
        for &seat in &self.turn_order {
            let cards = self.deck.draw(self.rules.hand_size)?;
            self.players[seat].hand.extend(cards);
        }
        let table = self.deck.draw(self.rules.table_size)?;
        self.table.extend(table);
        Ok(())
    }

    pub(crate) fn redeal(&mut self, player: usize) -> Result<(), GameError> {
        let cards = self.deck.draw(self.rules.hand_size)?;
        self.players[player].hand.extend(cards);
        Ok(())
    }

    pub(crate) fn reshuffle(&mut self) {
        self.deck = Deck::shuffled(&mut self.rng);
    }

    /// Verifies that every card of the deck sits in exactly one place.
    pub fn check_conservation(&self) -> Result<(), GameError> {
        let mut seen = [0u8; DECK_SIZE];
        let all = self
            .deck
            .cards()
            .iter()
            .chain(self.table.cards())
            .chain(
                self.players
                    .iter()
                    .flat_map(|p| p.hand.iter().chain(p.discard_pile.cards())),
            );
        for card in all {
            seen[card.index()] += 1;
        }

        let standard = Deck::standard();
        let mut problems = Vec::new();
        for card in standard.cards() {
            match seen[card.index()] {
                1 => {}
                0 => problems.push(format!("{card} missing")),
                n => problems.push(format!("{card} present {n} times")),
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(GameError::InvariantViolation(problems.join(", ")))
        }
    }
}

fn seat_players<S: AsRef<str>>(names: &[S]) -> Result<Vec<Player>, GameError> {
    if names.is_empty() {
        return Err(GameError::NoPlayers);
    }
    let mut taken: Vec<String> = Vec::with_capacity(names.len());
    for raw in names {
        let name = validate_name(raw.as_ref(), &taken)?;
        taken.push(name);
    }
    Ok(taken.into_iter().map(Player::new).collect())
}

fn player_slot(players: &mut [Player], seat: usize) -> Result<&mut Player, GameError> {
    let count = players.len();
    players.get_mut(seat).ok_or(GameError::UnknownPlayer {
        index: seat,
        players: count,
    })
}
