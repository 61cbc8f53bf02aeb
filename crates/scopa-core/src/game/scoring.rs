use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::score::{ScoreBoard, ScoringRule, unique_max};
use crate::model::suit::Suit;
use core::cmp::Reverse;
use serde::Serialize;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub index: usize,
    pub name: String,
    pub score: u32,
    pub message: String,
}

/// Piles and sweeps a board was tallied from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoredRound {
    board: ScoreBoard,
    pile_sizes: Vec<usize>,
    sweeps: Vec<u32>,
}

/// Tallies the four end-of-round awards into cumulative scores.
///
/// Each round contributes one board to the totals. Calling again with the
/// same piles returns that board and only re-checks whether the game is over.
/// If cards were captured since the last call, the earlier awards are taken
/// back and the round is tallied afresh.
pub fn calculate_final_scores(state: &mut GameState) -> ScoreBoard {
    let round = state.round_number;
    let pile_sizes: Vec<usize> = state.players.iter().map(|p| p.discard_pile.len()).collect();

    if let Some(previous) = state.scored.take().filter(|s| s.board.round() == round) {
        if previous.pile_sizes == pile_sizes && previous.sweeps == state.round_sweeps {
            let board = previous.board.clone();
            state.scored = Some(previous);
            state.game_over = is_game_over(state);
            return board;
        }
        for (player, points) in state.players.iter_mut().zip(previous.board.per_player()) {
            player.score = player.score.saturating_sub(*points);
        }
    }

    let board = tally(state);
    for (player, points) in state.players.iter_mut().zip(board.per_player()) {
        player.score += points;
    }
    state.scored = Some(ScoredRound {
        board: board.clone(),
        pile_sizes,
        sweeps: state.round_sweeps.clone(),
    });
    state.game_over = is_game_over(state);

    if tracing::enabled!(Level::INFO) {
        let rule_winners = ScoringRule::ALL
            .iter()
            .map(|rule| match board.winner_of(*rule) {
                Some(seat) => format!("{rule}={seat}"),
                None => format!("{rule}=-"),
            })
            .collect::<Vec<_>>()
            .join(",");
        event!(
            target: "scopa_core::scoring",
            Level::INFO,
            round = board.round(),
            awards = ?board.per_player(),
            awarded = board.total_awarded(),
            rule_winners = %rule_winners,
            totals = ?state.scores(),
            game_over = state.game_over,
            "round scored"
        );
    }

    board
}

fn tally(state: &GameState) -> ScoreBoard {
    let piles: Vec<_> = state.players.iter().map(|p| &p.discard_pile).collect();
    let mut board = ScoreBoard::new(state.round_number, piles.len());

    let card_counts: Vec<u32> = piles.iter().map(|p| p.len() as u32).collect();
    if let Some(seat) = unique_max(&card_counts) {
        board.award(ScoringRule::MostCards, seat);
    }

    let coin_counts: Vec<u32> = piles
        .iter()
        .map(|p| p.count_suit(Suit::SCORING) as u32)
        .collect();
    if let Some(seat) = unique_max(&coin_counts) {
        board.award(ScoringRule::MostCoins, seat);
    }

    if let Some(seat) = piles.iter().position(|p| p.contains(Card::SEVEN_OF_COINS)) {
        board.award(ScoringRule::SevenOfCoins, seat);
    }

    let sums: Vec<u32> = piles.iter().map(|p| p.rank_sum()).collect();
    if let Some(seat) = unique_max(&sums) {
        board.award(ScoringRule::HighestSum, seat);
    }

    if state.rules.sweeps_score {
        for (seat, &sweeps) in state.round_sweeps.iter().enumerate() {
            board.add_bonus(seat, sweeps);
        }
    }

    board
}

/// The game ends when a single player leads with at least the winning score.
pub fn is_game_over(state: &GameState) -> bool {
    let scores = state.scores();
    match unique_max(&scores) {
        Some(seat) => scores[seat] >= state.rules.winning_score,
        None => false,
    }
}

/// Highest cumulative score wins; equal scores go to the lowest seat.
pub fn declare_winner(state: &GameState) -> Winner {
    let index = state
        .players
        .iter()
        .enumerate()
        .min_by_key(|(seat, player)| (Reverse(player.score), *seat))
        .map(|(seat, _)| seat)
        .unwrap_or(0);
    let winner = &state.players[index];

    let standings = state
        .players
        .iter()
        .map(|p| {
            format!(
                "{} {} ({} sweep{})",
                p.name(),
                p.score,
                p.special_points,
                if p.special_points == 1 { "" } else { "s" }
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    let message = format!(
        "{} wins with {} points! Final scores: {standings}",
        winner.name(),
        winner.score
    );

    event!(
        target: "scopa_core::scoring",
        Level::INFO,
        winner = index,
        score = winner.score,
        rounds = state.round_number,
        "game decided"
    );

    Winner {
        index,
        name: winner.name().to_string(),
        score: winner.score,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::{calculate_final_scores, declare_winner, is_game_over};
    use crate::game::round::{handle_round_end, is_round_over};
    use crate::game::state::{GameState, Layout};
    use crate::game::turn::play_turn;
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::rank::Rank;
    use crate::model::score::ScoringRule;
    use crate::model::suit::Suit;
    use crate::rules::RuleSet;

    fn card(rank: u8, suit: Suit) -> Card {
        Card::new(Rank::from_value(rank).unwrap(), suit)
    }

    fn with_piles(piles: Vec<Vec<Card>>, scores: Vec<u32>, rules: RuleSet) -> GameState {
        let names = (0..piles.len()).map(|i| format!("P{i}")).collect();
        GameState::from_layout(
            Layout {
                names,
                discards: piles,
                scores,
                ..Layout::default()
            },
            rules,
        )
        .unwrap()
    }

    fn classic_piles() -> Vec<Vec<Card>> {
        vec![
            vec![
                card(1, Suit::Coins),
                card(2, Suit::Coins),
                card(3, Suit::Cups),
                card(4, Suit::Swords),
                card(5, Suit::Clubs),
            ],
            vec![
                card(3, Suit::Coins),
                card(4, Suit::Coins),
                card(5, Suit::Coins),
                card(6, Suit::Cups),
            ],
            vec![card(7, Suit::Coins), card(8, Suit::Swords), card(9, Suit::Cups)],
        ]
    }

    #[test]
    fn each_rule_awards_one_point() {
        let mut state = with_piles(classic_piles(), Vec::new(), RuleSet::default());
        let board = calculate_final_scores(&mut state);

        assert_eq!(board.winner_of(ScoringRule::MostCards), Some(0));
        assert_eq!(board.winner_of(ScoringRule::MostCoins), Some(1));
        assert_eq!(board.winner_of(ScoringRule::SevenOfCoins), Some(2));
        assert_eq!(board.winner_of(ScoringRule::HighestSum), Some(2));
        assert_eq!(state.scores(), vec![1, 1, 2]);
    }

    #[test]
    fn tied_leaders_get_nothing() {
        let piles = vec![
            vec![card(2, Suit::Cups), card(3, Suit::Swords)],
            vec![card(1, Suit::Clubs), card(4, Suit::Cups)],
        ];
        let mut state = with_piles(piles, Vec::new(), RuleSet::default());
        let board = calculate_final_scores(&mut state);
        assert_eq!(board.total_awarded(), 0);
        assert_eq!(state.scores(), vec![0, 0]);
    }

    #[test]
    fn empty_piles_award_nothing() {
        let mut state = with_piles(vec![Vec::new(); 3], Vec::new(), RuleSet::default());
        let board = calculate_final_scores(&mut state);
        assert_eq!(board.total_awarded(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn scoring_twice_in_a_round_does_not_double_award() {
        let mut state = with_piles(classic_piles(), Vec::new(), RuleSet::default());
        let first = calculate_final_scores(&mut state);
        let second = calculate_final_scores(&mut state);
        assert_eq!(first, second);
        assert_eq!(state.scores(), vec![1, 1, 2]);
    }

    #[test]
    fn rescoring_picks_up_a_changed_total() {
        let mut state = with_piles(vec![Vec::new(); 3], Vec::new(), RuleSet::default());
        calculate_final_scores(&mut state);
        assert!(!state.is_game_over());

        state.players[2].score = 1000;
        calculate_final_scores(&mut state);
        assert!(state.is_game_over());
    }

    #[test]
    fn sweeps_count_when_enabled() {
        let rules = RuleSet {
            sweeps_score: true,
            ..RuleSet::default()
        };
        let mut state = with_piles(vec![Vec::new(); 2], Vec::new(), rules);
        state.round_sweeps[1] = 2;
        let board = calculate_final_scores(&mut state);
        assert_eq!(board.per_player(), &[0, 2]);
    }

    #[test]
    fn reaching_the_threshold_ends_the_game() {
        let state = with_piles(vec![Vec::new(); 3], vec![3, 8, 5], RuleSet::default());
        assert!(is_game_over(&state));
    }

    #[test]
    fn tie_at_the_top_keeps_playing() {
        let state = with_piles(vec![Vec::new(); 3], vec![40, 40, 15], RuleSet::default());
        assert!(!is_game_over(&state));
    }

    #[test]
    fn highest_score_wins() {
        let state = with_piles(vec![Vec::new(); 3], vec![32, 33, 31], RuleSet::default());
        let winner = declare_winner(&state);
        assert_eq!(winner.index, 1);
        assert_eq!(winner.name, "P1");
        assert!(winner.message.contains("P1 wins with 33 points"));
        assert!(winner.message.contains("P0 32"));
        assert!(winner.message.contains("P2 31"));
    }

    #[test]
    fn tied_winner_goes_to_lowest_seat() {
        let state = with_piles(vec![Vec::new(); 3], vec![15, 40, 40], RuleSet::default());
        assert_eq!(declare_winner(&state).index, 1);
    }

    #[test]
    fn full_deck_scores_consistently() {
        let all = Deck::standard().cards().to_vec();
        let mut state = with_piles(vec![all, Vec::new()], Vec::new(), RuleSet::default());
        let board = calculate_final_scores(&mut state);
        assert_eq!(board.per_player(), &[4, 0]);
    }

    #[test]
    fn scoring_before_the_round_is_played_does_not_freeze_it() {
        let mut state = GameState::with_seed(&["Alice", "Bob", "Charlie"], 8).unwrap();
        let early = calculate_final_scores(&mut state);
        assert_eq!(early.total_awarded(), 0);

        let mut turns = 0;
        while !is_round_over(&state) {
            let player = state.current_player();
            play_turn(&mut state, player, 0).unwrap();
            turns += 1;
            if turns == 10 {
                calculate_final_scores(&mut state);
            }
        }
        handle_round_end(&mut state);
        let late = calculate_final_scores(&mut state);

        // The seven of coins always lands in someone's pile by round end.
        assert!(late.winner_of(ScoringRule::SevenOfCoins).is_some());
        assert_eq!(state.scores(), late.per_player().to_vec());
    }

    #[test]
    fn a_capture_after_scoring_replaces_the_earlier_awards() {
        let mut piles = classic_piles();
        piles[1].clear();
        let mut state = with_piles(piles, vec![2, 0, 0], RuleSet::default());
        let first = calculate_final_scores(&mut state);
        assert_eq!(first.winner_of(ScoringRule::MostCards), Some(0));

        let extra = [
            card(1, Suit::Cups),
            card(2, Suit::Cups),
            card(4, Suit::Cups),
            card(5, Suit::Cups),
            card(6, Suit::Cups),
        ];
        // P0 and P1 now hold five cards each, so nobody has the most.
        state.players[1].discard_pile.extend(extra);
        let second = calculate_final_scores(&mut state);

        assert_eq!(second.winner_of(ScoringRule::MostCards), None);
        let carried = [2, 0, 0];
        let expected: Vec<u32> = carried
            .iter()
            .zip(second.per_player())
            .map(|(base, points)| base + points)
            .collect();
        assert_eq!(state.scores(), expected);
    }
}
