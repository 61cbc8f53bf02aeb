use std::io::{self, Write};
use std::path::PathBuf;

use scopa_core::collaborators::CardChooser;
use scopa_core::{GameController, GameError, GameState, Winner};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::GameConfig;
use crate::console::ConsoleObserver;
use crate::report::{ReportError, ReportWriter};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game aborted: {0}")]
    Game(#[from] GameError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("console output failed: {0}")]
    Console(#[from] io::Error),
}

/// What a finished game leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub winner: Winner,
    pub rounds: u32,
    pub seed: u64,
    pub scores: Vec<u32>,
    pub report_path: Option<PathBuf>,
    pub report_rows: usize,
}

/// Seats `names`, plays a whole game with `chooser` and narrates it to `console`.
pub fn run_session<C, W>(
    config: &GameConfig,
    names: &[String],
    chooser: C,
    console: W,
) -> Result<SessionSummary, SessionError>
where
    C: CardChooser,
    W: Write,
{
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let state = GameState::with_rules(names, config.rules, seed)?;
    event!(
        target: "scopa_cli::session",
        Level::INFO,
        seed,
        players = names.len(),
        winning_score = config.rules.winning_score,
        "game starting"
    );

    let report = config
        .outputs
        .report
        .as_ref()
        .map(ReportWriter::create)
        .transpose()?;
    let report_path = report.as_ref().map(|r| r.path().to_path_buf());

    let mut controller = GameController::new(state, chooser, (ConsoleObserver::new(console), report));
    let winner = controller.run()?;
    let (state, (console, report)) = controller.into_parts();

    console.finish()?;
    let report_rows = match report {
        Some(report) => report.finish()?,
        None => 0,
    };

    Ok(SessionSummary {
        winner,
        rounds: state.round_number(),
        seed,
        scores: state.scores(),
        report_path,
        report_rows,
    })
}
