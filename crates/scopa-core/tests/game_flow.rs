use scopa_core::collaborators::{FirstCardChooser, ScriptedNames, collect_names};
use scopa_core::game::capture::CaptureKind;
use scopa_core::model::card::Card;
use scopa_core::model::deck::Deck;
use scopa_core::model::rank::Rank;
use scopa_core::model::suit::Suit;
use scopa_core::{
    GameController, GameError, GameState, Layout, RuleSet, calculate_final_scores,
    declare_winner, handle_round_end, is_round_over, play_turn, start_next_round,
};

fn card(rank: u8, suit: Suit) -> Card {
    Card::new(Rank::from_value(rank).expect("rank in range"), suit)
}

fn everything_except(placed: &[Card]) -> Vec<Card> {
    Deck::standard()
        .cards()
        .iter()
        .copied()
        .filter(|c| !placed.contains(c))
        .collect()
}

#[test]
fn last_play_of_a_round_then_scoring() {
    // Alice holds the last card; Bob has already captured most of the deck.
    let alice_card = card(7, Suit::Coins);
    let table = vec![card(3, Suit::Coins), card(4, Suit::Coins), card(6, Suit::Swords)];
    let mut placed = table.clone();
    placed.push(alice_card);

    let mut state = GameState::from_layout(
        Layout {
            names: vec!["Alice".into(), "Bob".into(), "Charlie".into()],
            hands: vec![vec![alice_card]],
            discards: vec![Vec::new(), everything_except(&placed)],
            table,
            deck: Some(Vec::new()),
            ..Layout::default()
        },
        RuleSet::default(),
    )
    .expect("layout is complete");

    let outcome = play_turn(&mut state, 0, 0).expect("turn resolves");
    assert_eq!(outcome.kind, CaptureKind::Combination);
    assert_eq!(outcome.captured, vec![card(3, Suit::Coins), card(4, Suit::Coins)]);
    assert!(is_round_over(&state));

    let summary = handle_round_end(&mut state);
    assert_eq!(summary.swept_to, Some(0));
    assert_eq!(summary.swept_cards, vec![card(6, Suit::Swords)]);

    let board = calculate_final_scores(&mut state);
    // Alice: seven of coins. Bob: most cards, most coins, highest sum.
    assert_eq!(board.per_player(), &[1, 3, 0]);
    assert_eq!(state.scores(), vec![1, 3, 0]);
    assert!(state.check_conservation().is_ok());
}

#[test]
fn conservation_holds_for_whole_games_across_seeds() {
    for seed in 0..12u64 {
        let state = GameState::with_seed(&["Alice", "Bob", "Charlie"], seed).unwrap();
        let mut controller = GameController::new(state, FirstCardChooser, ());
        let winner = controller.run().expect("game completes");
        let state = controller.state();
        assert!(state.check_conservation().is_ok(), "seed {seed}");
        assert!(winner.index < 3);
    }
}

#[test]
fn same_seed_replays_the_same_game() {
    let play = |seed| {
        let state = GameState::with_seed(&["Alice", "Bob"], seed).unwrap();
        let mut controller = GameController::new(state, FirstCardChooser, ());
        let winner = controller.run().unwrap();
        (winner, controller.into_state().scores())
    };
    assert_eq!(play(31), play(31));
}

#[test]
fn manual_round_loop_matches_the_controller_contract() {
    let mut state = GameState::with_seed(&["Alice", "Bob", "Charlie"], 9).unwrap();
    let mut turns = 0;
    while !is_round_over(&state) {
        let player = state.current_player();
        play_turn(&mut state, player, 0).unwrap();
        turns += 1;
    }
    assert_eq!(turns, 36);

    handle_round_end(&mut state);
    calculate_final_scores(&mut state);
    if !state.is_game_over() {
        start_next_round(&mut state).unwrap();
        assert_eq!(state.round_number(), 2);
        assert_eq!(state.table().len(), 4);
    }
    let winner = declare_winner(&state);
    assert!(winner.message.contains("Final scores"));
}

#[test]
fn names_are_collected_before_seating() {
    let mut source = ScriptedNames::new(["Computer", "Alice", "Bob", "Charlie"]);
    let names = collect_names(&mut source, 3).unwrap();
    let state = GameState::with_seed(&names, 1).unwrap();
    assert_eq!(state.players()[0].name(), "Alice");
}

#[test]
fn redeal_on_an_exhausted_deck_is_refused() {
    let left_in_deck = vec![card(1, Suit::Cups), card(2, Suit::Cups)];
    let everything_else = everything_except(&left_in_deck);

    let mut state = GameState::from_layout(
        Layout {
            names: vec!["Alice".into()],
            discards: vec![everything_else],
            deck: Some(left_in_deck),
            ..Layout::default()
        },
        RuleSet::default(),
    )
    .unwrap();

    assert_eq!(
        play_turn(&mut state, 0, 0).unwrap_err(),
        GameError::InsufficientCards {
            needed: 3,
            available: 2
        }
    );
}
