use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use scopa_core::collaborators::GameObserver;
use scopa_core::{GameState, RoundSummary, TurnOutcome, Winner};
use scopa_core::model::score::ScoreBoard;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on report {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to serialize report row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ReportRow<'a> {
    Turn {
        round: u32,
        name: &'a str,
        #[serde(flatten)]
        outcome: &'a TurnOutcome,
    },
    Round {
        #[serde(flatten)]
        summary: &'a RoundSummary,
        board: &'a ScoreBoard,
        totals: Vec<u32>,
    },
    Game {
        #[serde(flatten)]
        winner: &'a Winner,
        rounds: u32,
        seed: u64,
    },
}

/// Writes one JSON object per line for every turn, round and the final result.
///
/// Observer callbacks cannot fail, so the first error is held until [`ReportWriter::finish`].
pub struct ReportWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    rows: usize,
    error: Option<ReportError>,
}

impl ReportWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| ReportError::Io {
            source,
            path: path.clone(),
        };
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let file = File::create(&path).map_err(io_err)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
            rows: 0,
            error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and returns the number of rows written.
    pub fn finish(mut self) -> Result<usize, ReportError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush().map_err(|source| ReportError::Io {
            source,
            path: self.path.clone(),
        })?;
        Ok(self.rows)
    }

    fn write_row(&mut self, row: &ReportRow<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, row)
            .map_err(ReportError::from)
            .and_then(|()| {
                self.writer
                    .write_all(b"\n")
                    .map_err(|source| ReportError::Io {
                        source,
                        path: self.path.clone(),
                    })
            });
        match result {
            Ok(()) => self.rows += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

impl GameObserver for ReportWriter {
    fn turn_played(&mut self, state: &GameState, outcome: &TurnOutcome) {
        let name = state.players()[outcome.player].name();
        self.write_row(&ReportRow::Turn {
            round: state.round_number(),
            name,
            outcome,
        });
    }

    fn round_finished(&mut self, state: &GameState, summary: &RoundSummary, board: &ScoreBoard) {
        self.write_row(&ReportRow::Round {
            summary,
            board,
            totals: state.scores(),
        });
    }

    fn game_finished(&mut self, state: &GameState, winner: &Winner) {
        self.write_row(&ReportRow::Game {
            winner,
            rounds: state.round_number(),
            seed: state.seed(),
        });
    }
}
