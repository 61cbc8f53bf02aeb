//! Terminal front end: name prompts, card selection and a running commentary.

use std::io::{self, BufRead, Write};

use scopa_core::collaborators::{CardChooser, GameObserver, NameSource, TurnView};
use scopa_core::game::capture::CaptureKind;
use scopa_core::model::card::Card;
use scopa_core::model::score::{ScoreBoard, ScoringRule};
use scopa_core::{GameError, GameState, NameError, RoundSummary, TurnOutcome, Winner};

fn list(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads one trimmed line; `None` on end of input or a read error.
fn read_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.output, "{question}").ok()?;
        self.output.flush().ok()?;
        read_line(&mut self.input)
    }

    fn say(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> NameSource for Prompt<R, W> {
    fn next_name(&mut self, seat: usize) -> Option<String> {
        self.ask(&format!("Enter a name for player {}: ", seat + 1))
    }

    fn rejected(&mut self, _seat: usize, error: &NameError) {
        self.say(&format!("{error}. Please choose another name."));
    }
}

impl<R: BufRead, W: Write> CardChooser for Prompt<R, W> {
    fn choose(&mut self, view: &TurnView<'_>) -> Option<usize> {
        self.say(&format!(
            "\n{}'s turn ({} cards left in the deck)\nTable: {}",
            view.name,
            view.deck_remaining,
            list(view.table)
        ));
        for (index, card) in view.hand.iter().enumerate() {
            self.say(&format!("  {}: {card}", index + 1));
        }
        loop {
            let answer = self.ask(&format!("Choose a card (1-{}): ", view.hand.len()))?;
            match answer.parse::<usize>() {
                Ok(pick) if pick > 0 => return Some(pick - 1),
                _ => self.say("Please enter the number shown next to a card."),
            }
        }
    }

    fn rejected(&mut self, _player: usize, error: &GameError) {
        self.say(&format!("{error}. Try again."));
    }
}

/// Narrates the game as it happens.
///
/// The first write failure is kept and reported by [`ConsoleObserver::finish`].
pub struct ConsoleObserver<W> {
    output: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.output.flush()?;
        Ok(self.output)
    }

    fn line(&mut self, text: String) {
        if self.error.is_none() {
            if let Err(err) = writeln!(self.output, "{text}") {
                self.error = Some(err);
            }
        }
    }
}

impl<W: Write> GameObserver for ConsoleObserver<W> {
    fn turn_played(&mut self, state: &GameState, outcome: &TurnOutcome) {
        let name = state.players()[outcome.player].name();
        let Some(card) = outcome.played else {
            self.line(format!("{name} has no cards left and passes."));
            return;
        };
        let text = match outcome.kind {
            CaptureKind::Direct | CaptureKind::Combination => {
                format!("{name} plays {card} and captures {}.", list(&outcome.captured))
            }
            CaptureKind::NoMatch => format!("{name} plays {card} onto the table."),
        };
        self.line(text);
        if outcome.sweep_bonus {
            self.line(format!("Scopa! {name} swept the table."));
        }
    }

    fn round_finished(&mut self, state: &GameState, summary: &RoundSummary, board: &ScoreBoard) {
        self.line(format!("\n--- Round {} over ---", summary.round));
        if let Some(seat) = summary.swept_to {
            self.line(format!(
                "{} collects the remaining table: {}.",
                state.players()[seat].name(),
                list(&summary.swept_cards)
            ));
        }
        for rule in ScoringRule::ALL {
            let text = match board.winner_of(rule) {
                Some(seat) => format!("  {rule}: {}", state.players()[seat].name()),
                None => format!("  {rule}: nobody"),
            };
            self.line(text);
        }
        let totals = state
            .players()
            .iter()
            .map(|p| format!("{} {}", p.name(), p.score))
            .collect::<Vec<_>>()
            .join(", ");
        self.line(format!("Scores: {totals}"));
    }

    fn game_finished(&mut self, _state: &GameState, winner: &Winner) {
        self.line(format!("\n{}", winner.message));
    }
}
